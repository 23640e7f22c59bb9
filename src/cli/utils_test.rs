use crate::cli::utils::*;
use tabled::builder::Builder;

#[test]
fn test_truncate_with_ellipsis_short_string() {
    assert_eq!(truncate_with_ellipsis("Ana", 10), "Ana");
}

#[test]
fn test_truncate_with_ellipsis_exact_length() {
    assert_eq!(truncate_with_ellipsis("William", 7), "William");
}

#[test]
fn test_truncate_with_ellipsis_long_string() {
    assert_eq!(
        truncate_with_ellipsis("William Carvalho dos Santos", 10),
        "William..."
    );
}

#[test]
fn test_truncate_with_ellipsis_unicode() {
    assert_eq!(truncate_with_ellipsis("João Estética", 13), "João Estética");
    assert_eq!(truncate_with_ellipsis("João Estética", 7), "João...");
}

#[test]
fn test_apply_table_style_uses_rounded_corners() {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name"]);
    let mut table = builder.build();
    apply_table_style(&mut table);
    assert!(table.to_string().contains('╭'));
}
