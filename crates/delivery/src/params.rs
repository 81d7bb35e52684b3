//! Query parameters appended to delivery requests.

use std::fmt;

/// A single query-string parameter.
///
/// [`pair`](Parameter::pair) yields the raw name and value; values are
/// percent-encoded when the url is assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// `elements.<element>=<value>` equality filter.
    Equals { element: String, value: String },
    /// Maximum number of items to return.
    Limit(u32),
    /// Number of items to skip for paging.
    Skip(u32),
    /// Depth of linked-item expansion inlined into `modular_content`.
    Depth(u32),
    /// Language variant to request.
    Language(String),
    /// Sort order, e.g. `order=elements.title[asc]`.
    Order {
        element: String,
        direction: SortDirection,
    },
    /// Project the response down to the named elements.
    Elements(Vec<String>),
}

/// Sort direction of an [`Parameter::Order`] parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl Parameter {
    /// Equality filter on an element.
    pub fn equals(element: impl Into<String>, value: impl Into<String>) -> Self {
        Parameter::Equals {
            element: element.into(),
            value: value.into(),
        }
    }

    /// Ascending order on an element path.
    pub fn order_asc(element: impl Into<String>) -> Self {
        Parameter::Order {
            element: element.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending order on an element path.
    pub fn order_desc(element: impl Into<String>) -> Self {
        Parameter::Order {
            element: element.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Name/value pair as it appears in the query string.
    pub fn pair(&self) -> (String, String) {
        match self {
            Parameter::Equals { element, value } => {
                (format!("elements.{element}"), value.clone())
            }
            Parameter::Limit(n) => ("limit".to_string(), n.to_string()),
            Parameter::Skip(n) => ("skip".to_string(), n.to_string()),
            Parameter::Depth(n) => ("depth".to_string(), n.to_string()),
            Parameter::Language(language) => ("language".to_string(), language.clone()),
            Parameter::Order { element, direction } => {
                ("order".to_string(), format!("{element}[{direction}]"))
            }
            Parameter::Elements(names) => ("elements".to_string(), names.join(",")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn equals_filter_targets_the_element() {
        let (name, value) = Parameter::equals("title", "Rick").pair();
        assert_eq!(name, "elements.title");
        assert_eq!(value, "Rick");
    }

    #[test]
    fn paging_parameters_render_numbers() {
        assert_eq!(Parameter::Limit(5).pair(), ("limit".to_string(), "5".to_string()));
        assert_eq!(Parameter::Skip(10).pair(), ("skip".to_string(), "10".to_string()));
        assert_eq!(Parameter::Depth(2).pair(), ("depth".to_string(), "2".to_string()));
    }

    #[test]
    fn order_uses_bracket_syntax() {
        let (name, value) = Parameter::order_desc("system.last_modified").pair();
        assert_eq!(name, "order");
        assert_eq!(value, "system.last_modified[desc]");
    }

    #[test]
    fn elements_projection_joins_names() {
        let (name, value) =
            Parameter::Elements(vec!["title".to_string(), "body".to_string()]).pair();
        assert_eq!(name, "elements");
        assert_eq!(value, "title,body");
    }
}
