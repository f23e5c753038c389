use crate::{command_args, split_args};

#[test]
fn test_split_args() {
    assert_eq!(split_args("list"), vec!["list"]);
    assert_eq!(
        split_args(r#"add "João Silva" joao@email.com 11999887766"#),
        vec!["add", "João Silva", "joao@email.com", "11999887766"]
    );
    assert_eq!(split_args("  edit   7  --name  Ana "), vec!["edit", "7", "--name", "Ana"]);
    assert!(split_args(r#""""#).is_empty());
}

#[test]
fn test_nothing_to_run() {
    assert_eq!(command_args(""), None);
    assert_eq!(command_args("   "), None);
    assert_eq!(command_args(r#""""#), None);
    assert_eq!(command_args(r#"  "" "" "#), None);
}

#[test]
fn test_command_line() {
    assert_eq!(command_args(" help add "), Some(vec!["help".to_string(), "add".to_string()]));
    assert_eq!(
        command_args(r#"search "Maria Joao""#),
        Some(vec!["search".to_string(), "Maria Joao".to_string()])
    );
}
