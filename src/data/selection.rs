//! Selection State
//! Countries and columns currently chosen by the user.

/// User-controlled filter choices.
///
/// Both lists hold unique names. Columns keep the order in which they were
/// selected, which is also the order charts are produced in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    countries: Vec<String>,
    columns: Vec<String>,
}

impl Selection {
    /// Start with the given countries selected and no columns.
    pub fn new(countries: Vec<String>) -> Self {
        let mut selection = Self::default();
        for country in countries {
            selection.select_country(&country);
        }
        selection
    }

    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_country_selected(&self, country: &str) -> bool {
        self.countries.iter().any(|c| c == country)
    }

    pub fn is_column_selected(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    fn select_country(&mut self, country: &str) {
        if !self.is_country_selected(country) {
            self.countries.push(country.to_string());
        }
    }

    pub fn toggle_country(&mut self, country: &str) {
        if self.is_country_selected(country) {
            self.countries.retain(|c| c != country);
        } else {
            self.countries.push(country.to_string());
        }
    }

    /// Selecting appends to the end; deselecting removes in place.
    pub fn toggle_column(&mut self, column: &str) {
        if self.is_column_selected(column) {
            self.columns.retain(|c| c != column);
        } else {
            self.columns.push(column.to_string());
        }
    }

    pub fn set_countries(&mut self, countries: &[String]) {
        self.countries.clear();
        for country in countries {
            self.select_country(country);
        }
    }

    pub fn clear_countries(&mut self) {
        self.countries.clear();
    }

    pub fn clear_columns(&mut self) {
        self.columns.clear();
    }

    /// Drop selected columns that the current table does not have.
    pub fn retain_columns(&mut self, available: &[String]) {
        self.columns.retain(|c| available.contains(c));
    }
}
