pub mod analyze_label;
pub mod get_age_groups;
pub mod get_example_report;
