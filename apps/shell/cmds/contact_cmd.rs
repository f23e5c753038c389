use clap::{arg, value_parser, Command};

pub(crate) fn go_cli() -> Command {
    Command::new("go")
        .about("Navigate to a page: /, /?inativos=true, /favoritos or /login")
        .arg(arg!(<PATH> "The page path"))
}

pub(crate) fn list_cli() -> Command {
    Command::new("list")
        .about("Reload and list the contacts of the current page")
}

pub(crate) fn filter_cli() -> Command {
    Command::new("filter")
        .about("Adjust the list filters and reload")
        .arg(arg!(--active <BOOL> "Only active contacts")
            .required(false)
            .value_parser(value_parser!(bool)))
        .arg(arg!(--inactive <BOOL> "Only inactive contacts")
            .required(false)
            .value_parser(value_parser!(bool)))
        .arg(arg!(--favorites <BOOL> "Only favorite contacts")
            .required(false)
            .value_parser(value_parser!(bool)))
}

pub(crate) fn search_cli() -> Command {
    Command::new("search")
        .about("Search the loaded contacts by name, email or phone")
        .arg(arg!([TERM] "The search term, empty to clear"))
}

pub(crate) fn show_cli() -> Command {
    Command::new("show")
        .about("Show the details of a contact")
        .arg(arg!(<ID> "The contact id").value_parser(value_parser!(u64)))
}

pub(crate) fn add_cli() -> Command {
    Command::new("add")
        .about("Create a contact")
        .arg(arg!(<NAME> "The contact name"))
        .arg(arg!(<EMAIL> "The contact email"))
        .arg(arg!(<MOBILE> "The mobile number, DDD included"))
        .arg(arg!(--landline <PHONE> "The landline number, DDD included").required(false))
}

pub(crate) fn edit_cli() -> Command {
    Command::new("edit")
        .about("Edit a contact; the mobile number cannot change")
        .arg(arg!(<ID> "The contact id").value_parser(value_parser!(u64)))
        .arg(arg!(--name <NAME> "The new name").required(false))
        .arg(arg!(--email <EMAIL> "The new email").required(false))
        .arg(arg!(--landline <PHONE> "The new landline number").required(false))
}

pub(crate) fn fav_cli() -> Command {
    Command::new("fav")
        .about("Toggle the favorite flag of a contact")
        .arg(arg!(<ID> "The contact id").value_parser(value_parser!(u64)))
}

pub(crate) fn deactivate_cli() -> Command {
    Command::new("deactivate")
        .about("Deactivate a contact")
        .arg(arg!(<ID> "The contact id").value_parser(value_parser!(u64)))
}

pub(crate) fn reactivate_cli() -> Command {
    Command::new("reactivate")
        .about("Reactivate an inactive contact")
        .arg(arg!(<ID> "The contact id").value_parser(value_parser!(u64)))
}
