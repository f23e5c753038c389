use clap::{arg, Command};

pub(crate) fn login_cli() -> Command {
    Command::new("login")
        .about("Request a one-time login code by email")
        .arg(arg!(<EMAIL> "The email address that receives the code"))
        .arg_required_else_help(true)
}

pub(crate) fn verify_cli() -> Command {
    Command::new("verify")
        .about("Verify the 6-digit code received by email")
        .arg(arg!(<CODE> "The code from the email"))
        .arg_required_else_help(true)
}

pub(crate) fn back_cli() -> Command {
    Command::new("back")
        .about("Go back to typing another email address")
}

pub(crate) fn logout_cli() -> Command {
    Command::new("logout")
        .about("Sign out and forget the stored session")
}

pub(crate) fn me_cli() -> Command {
    Command::new("me")
        .about("Show the signed-in user")
}
