use std::fmt;
use std::str::FromStr;

/// Earliest year offered by the year selector.
pub const EARLIEST_YEAR: u16 = 2000;

/// One filing returned by a search. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRecord {
    pub id: String,
    pub date: String,
    pub title: String,
}

impl ReportRecord {
    pub fn new(id: impl Into<String>, date: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: date.into(),
            title: title.into(),
        }
    }
}

/// Document types the backend understands. There is no empty option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportType {
    #[default]
    Annual,
    FirstQuarter,
    HalfYear,
    ThirdQuarter,
    All,
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::Annual,
        ReportType::FirstQuarter,
        ReportType::HalfYear,
        ReportType::ThirdQuarter,
        ReportType::All,
    ];

    /// Token sent as the `report_type` query parameter.
    pub fn token(self) -> &'static str {
        match self {
            ReportType::Annual => "annual",
            ReportType::FirstQuarter => "q1",
            ReportType::HalfYear => "half",
            ReportType::ThirdQuarter => "q3",
            ReportType::All => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportType::Annual => "年报",
            ReportType::FirstQuarter => "一季报",
            ReportType::HalfYear => "中报",
            ReportType::ThirdQuarter => "三季报",
            ReportType::All => "全部类型",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownReportType(pub String);

impl fmt::Display for UnknownReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown report type `{}`", self.0)
    }
}

impl std::error::Error for UnknownReportType {}

impl FromStr for ReportType {
    type Err = UnknownReportType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        ReportType::ALL
            .into_iter()
            .find(|kind| kind.token().eq_ignore_ascii_case(token) || kind.label() == token)
            .ok_or_else(|| UnknownReportType(token.to_string()))
    }
}

/// An entry of the year selector; `value == None` is the "all years" option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearOption {
    pub value: Option<u16>,
    pub label: String,
}

/// The "all years" option followed by every year from `current_year` down to 2000.
pub fn year_options(current_year: u16) -> Vec<YearOption> {
    let mut options = vec![YearOption {
        value: None,
        label: ALL_YEARS_LABEL.to_string(),
    }];
    options.extend(
        (EARLIEST_YEAR..=current_year.max(EARLIEST_YEAR))
            .rev()
            .map(|year| YearOption {
                value: Some(year),
                label: year_label(Some(year)),
            }),
    );
    options
}

pub(crate) const ALL_YEARS_LABEL: &str = "全部年份";

pub(crate) fn year_label(year: Option<u16>) -> String {
    match year {
        Some(year) => format!("{year}年"),
        None => ALL_YEARS_LABEL.to_string(),
    }
}
