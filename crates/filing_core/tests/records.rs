use filing_core::{year_options, ReportType, EARLIEST_YEAR};

#[test]
fn year_options_run_from_current_year_down_to_2000() {
    let options = year_options(2026);

    assert_eq!(options.len(), 1 + 27);
    assert_eq!(options[0].value, None);
    assert_eq!(options[0].label, "全部年份");
    assert_eq!(options[1].value, Some(2026));
    assert_eq!(options[1].label, "2026年");
    assert_eq!(options.last().unwrap().value, Some(EARLIEST_YEAR));
}

#[test]
fn report_type_parses_tokens_and_labels() {
    assert_eq!("annual".parse::<ReportType>().unwrap(), ReportType::Annual);
    assert_eq!(" Q1 ".parse::<ReportType>().unwrap(), ReportType::FirstQuarter);
    assert_eq!("中报".parse::<ReportType>().unwrap(), ReportType::HalfYear);
    assert_eq!(ReportType::ThirdQuarter.to_string(), "q3");
    assert!("weekly".parse::<ReportType>().is_err());
}
