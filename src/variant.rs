use serde::{Deserialize, Serialize};

/// One selected option on a purchased product variant, e.g.
/// `{name: "Number of Pages", value: "24 Pages"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

impl SelectedOption {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Read-only variant data handed over by the commerce collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantData {
    pub id: String,
    pub title: String,
    pub selected_options: Vec<SelectedOption>,
    pub product_title: String,
    pub product_handle: String,
}

/// Page count when the variant carries no parseable page option.
pub const DEFAULT_PAGE_COUNT: usize = 12;

/// Design name when the variant carries no design/style option.
pub const DEFAULT_DESIGN_NAME: &str = "Photobook";

/// Extract the interior page count from variant options.
///
/// Scans for an option whose name contains "page", takes the first run of
/// digits in its value, and falls back to [`DEFAULT_PAGE_COUNT`]. Malformed
/// commerce metadata must never block the editor, so this cannot fail.
pub fn page_count_from_options(options: &[SelectedOption]) -> usize {
    let page_option = options
        .iter()
        .find(|opt| opt.name.to_lowercase().contains("page"));

    if let Some(opt) = page_option {
        if let Some(count) = first_digit_run(&opt.value) {
            return count;
        }
        log::debug!(
            "page option {:?} has no digits, using default page count",
            opt.value
        );
    }

    DEFAULT_PAGE_COUNT
}

/// Extract a display size ("8x8", "Large", ...) from variant options, if any.
pub fn size_from_options(options: &[SelectedOption]) -> Option<&str> {
    options
        .iter()
        .find(|opt| {
            let name = opt.name.to_lowercase();
            name.contains("size") || name.contains("dimension")
        })
        .map(|opt| opt.value.as_str())
}

/// Extract the design name from variant options, defaulting to
/// [`DEFAULT_DESIGN_NAME`].
pub fn design_name_from_options(options: &[SelectedOption]) -> &str {
    options
        .iter()
        .find(|opt| {
            let name = opt.name.to_lowercase();
            name.contains("design")
                || name.contains("template")
                || name.contains("style")
                || name.contains("layout")
        })
        .map(|opt| opt.value.as_str())
        .unwrap_or(DEFAULT_DESIGN_NAME)
}

fn first_digit_run(value: &str) -> Option<usize> {
    let digits: String = value
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(pairs: &[(&str, &str)]) -> Vec<SelectedOption> {
        pairs
            .iter()
            .map(|(n, v)| SelectedOption::new(*n, *v))
            .collect()
    }

    #[test]
    fn test_page_count_parses_digit_run() {
        let opts = options(&[("Number of Pages", "24 Pages")]);
        assert_eq!(page_count_from_options(&opts), 24);
    }

    #[test]
    fn test_page_count_default_when_missing() {
        let opts = options(&[("Size", "8x8")]);
        assert_eq!(page_count_from_options(&opts), DEFAULT_PAGE_COUNT);
    }

    #[test]
    fn test_page_count_default_when_unparseable() {
        let opts = options(&[("Pages", "lots")]);
        assert_eq!(page_count_from_options(&opts), DEFAULT_PAGE_COUNT);
    }

    #[test]
    fn test_size_and_design_extraction() {
        let opts = options(&[("Book Size", "8x8"), ("Design Style", "Modern")]);
        assert_eq!(size_from_options(&opts), Some("8x8"));
        assert_eq!(design_name_from_options(&opts), "Modern");
    }

    #[test]
    fn test_design_name_default() {
        assert_eq!(design_name_from_options(&[]), DEFAULT_DESIGN_NAME);
    }
}
