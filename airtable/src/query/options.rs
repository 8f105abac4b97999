use strum::{Display, EnumString};

use super::QueryEncoder;
use crate::error::QueryEncodingError;

const MAX_PAGE_SIZE: u64 = 100;

/// Sort order for one sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// How cell values are rendered in responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CellFormat {
    /// Native JSON values (the default).
    #[default]
    Json,
    /// Values as shown in the UI. Requires a time zone and user locale.
    String,
}

/// Typed options for listing records.
///
/// ## Examples
///
/// ```rust
/// use airtable::{ListOptions, QueryEncoder, SortDirection};
///
/// let options = ListOptions::new()
///     .fields(["Name", "Notes"])
///     .view("Grid view")
///     .sort("Name", SortDirection::Desc)
///     .page_size(50);
///
/// assert_eq!(
///     options.encode().unwrap(),
///     "fields%5B%5D=Name&fields%5B%5D=Notes&pageSize=50\
///      &sort%5B0%5D%5Bdirection%5D=desc&sort%5B0%5D%5Bfield%5D=Name&view=Grid+view"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    fields: Vec<String>,
    view: Option<String>,
    filter_by_formula: Option<String>,
    sort: Vec<Sort>,
    page_size: Option<u64>,
    max_records: Option<u64>,
    cell_format: Option<CellFormat>,
    time_zone: Option<String>,
    user_locale: Option<String>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only return this column. May be called repeatedly.
    pub fn field(mut self, name: impl Into<String>) -> Self {
        self.fields.push(name.into());
        self
    }

    pub fn fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Only return records visible in the named view, in that view's order.
    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    /// Only return records for which the formula evaluates truthy.
    pub fn filter_by_formula(mut self, formula: impl Into<String>) -> Self {
        self.filter_by_formula = Some(formula.into());
        self
    }

    /// Adds a sort key. Earlier keys take precedence.
    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    /// Records per page, 1 to 100.
    pub fn page_size(mut self, size: u64) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Upper bound on records returned across all pages.
    pub fn max_records(mut self, max: u64) -> Self {
        self.max_records = Some(max);
        self
    }

    pub fn cell_format(mut self, format: CellFormat) -> Self {
        self.cell_format = Some(format);
        self
    }

    pub fn time_zone(mut self, tz: impl Into<String>) -> Self {
        self.time_zone = Some(tz.into());
        self
    }

    pub fn user_locale(mut self, locale: impl Into<String>) -> Self {
        self.user_locale = Some(locale.into());
        self
    }

    fn validate(&self) -> Result<(), QueryEncodingError> {
        if let Some(size) = self.page_size {
            if !(1..=MAX_PAGE_SIZE).contains(&size) {
                return Err(QueryEncodingError::OutOfRange {
                    key: "pageSize",
                    value: size,
                    min: 1,
                    max: MAX_PAGE_SIZE,
                });
            }
        }

        if self.cell_format == Some(CellFormat::String) {
            if self.time_zone.is_none() {
                return Err(QueryEncodingError::MissingParameter {
                    key: "timeZone",
                    required_by: "cellFormat=string",
                });
            }
            if self.user_locale.is_none() {
                return Err(QueryEncodingError::MissingParameter {
                    key: "userLocale",
                    required_by: "cellFormat=string",
                });
            }
        }

        Ok(())
    }
}

impl QueryEncoder for ListOptions {
    fn query_pairs(&self) -> Result<Vec<(String, String)>, QueryEncodingError> {
        self.validate()?;

        let mut pairs: Vec<(String, String)> = self
            .fields
            .iter()
            .map(|f| ("fields[]".to_string(), f.clone()))
            .collect();

        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key.to_string(), value));
            }
        };
        push("view", self.view.clone());
        push("filterByFormula", self.filter_by_formula.clone());
        push("pageSize", self.page_size.map(|n| n.to_string()));
        push("maxRecords", self.max_records.map(|n| n.to_string()));
        push("cellFormat", self.cell_format.map(|f| f.to_string()));
        push("timeZone", self.time_zone.clone());
        push("userLocale", self.user_locale.clone());

        for (i, sort) in self.sort.iter().enumerate() {
            pairs.push((format!("sort[{i}][field]"), sort.field.clone()));
            pairs.push((format!("sort[{i}][direction]"), sort.direction.to_string()));
        }

        Ok(pairs)
    }
}
