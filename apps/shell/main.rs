use chrono::Utc;
use clap::{error, Parser, ArgMatches, Command};
use reedline::{Reedline, Signal};

mod prompt;
use prompt::MyPrompt;

mod cmds {
    pub(crate) mod auth_cmd;
    pub(crate) mod contact_cmd;
}


use contacts::{
    configuration as cfg,
    contacts::format,
    logger,
    AuthState,
    Client,
    ClientBuilder,
    Contact,
    ContactFilter,
    ContactForm,
    ContactListController,
    Notice,
    NoticeListener,
    Route,
    SessionListener,
    User,
};

fn build_cli() -> Command {
    let mut cmd = Command::new("contatos")
        .about("Interactive contacts shell application")
        .no_binary_name(true)
        .subcommand_required(true)
        .subcommand(cmds::auth_cmd::login_cli())
        .subcommand(cmds::auth_cmd::verify_cli())
        .subcommand(cmds::auth_cmd::back_cli())
        .subcommand(cmds::auth_cmd::logout_cli())
        .subcommand(cmds::auth_cmd::me_cli())
        .subcommand(cmds::contact_cmd::go_cli())
        .subcommand(cmds::contact_cmd::list_cli())
        .subcommand(cmds::contact_cmd::filter_cli())
        .subcommand(cmds::contact_cmd::search_cli())
        .subcommand(cmds::contact_cmd::show_cli())
        .subcommand(cmds::contact_cmd::add_cli())
        .subcommand(cmds::contact_cmd::edit_cli())
        .subcommand(cmds::contact_cmd::fav_cli())
        .subcommand(cmds::contact_cmd::deactivate_cli())
        .subcommand(cmds::contact_cmd::reactivate_cli())
        .help_template("{subcommands}");

    cmd.error(error::ErrorKind::InvalidSubcommand, "Invalid command provided");
    cmd
}

struct Shell {
    client: Client,
    page: Route,
    list: ContactListController,
}

impl Shell {
    fn new(client: Client) -> Self {
        let page = match client.current_route() {
            Route::Login => Route::Contacts,
            route => route,
        };
        let list = client.contact_list(page);
        Self { client, page, list }
    }

    fn prompt(&self) -> MyPrompt {
        MyPrompt::new(
            self.client.current_route(),
            self.client.auth().user().map(|u| u.name())
        )
    }

    /// Enters `route` through the guard; false when it ends on the login page.
    async fn open(&mut self, route: Route) -> bool {
        let landed = self.client.visit(route);
        if landed == Route::Login {
            if route != Route::Login {
                println!("Please login first: login <EMAIL>");
            }
            return false;
        }

        if landed != self.page {
            self.page = landed;
            self.list = self.client.contact_list(landed);
        }
        if self.list.load().await.is_ok() {
            print_contacts(&self.list);
        }
        true
    }

    /// The current contacts page, or false when the session is gone.
    fn ensure_page(&mut self) -> bool {
        let route = match self.client.current_route() {
            Route::Login => self.page,
            route => route,
        };
        if self.client.visit(route) == Route::Login {
            println!("Please login first: login <EMAIL>");
            return false;
        }
        true
    }
}

fn print_contacts(list: &ContactListController) {
    let visible = list.visible();
    if visible.is_empty() {
        match list.search().is_empty() {
            true => println!("No contacts."),
            false => println!("No contacts match '{}'.", list.search()),
        }
        return;
    }

    for c in visible.iter() {
        println!("{:>5}  {:<30}  {:<32}  {:<16}{}{}",
            c.id(),
            format::truncate(c.name(), 30),
            format::truncate(c.email(), 32),
            format::format_mobile(c.mobile()),
            if c.is_favorite() { "  ★" } else { "" },
            if c.is_active() { "" } else { "  (inativo)" },
        );
    }
    println!("Total: {} of {}", visible.len(), list.contacts().len());
}

fn print_contact(c: &Contact) {
    println!("Contact #{}", c.id());
    println!(" name:\t\t{}", c.name());
    println!(" email:\t\t{}", c.email());
    println!(" mobile:\t{}", format::format_mobile(c.mobile()));
    if let Some(landline) = c.landline() {
        println!(" landline:\t{}", format::format_landline(landline));
    }
    println!(" favorite:\t{}", c.is_favorite());
    println!(" active:\t{}", c.is_active());
    println!(" created:\t{} ({})",
        format::format_date_time(c.created_at()),
        format::elapsed_since(c.created_at(), &Utc::now())
    );
}

async fn execute_command(matches: ArgMatches, shell: &mut Shell) {
    match matches.subcommand() {
        Some(("login", m)) => {
            let email = m.get_one::<String>("EMAIL").unwrap();
            _ = shell.client.auth_mut().request_code(email).await.map_err(|e| {
                println!("Error: {e}");
            }).map(|_| {
                println!("Type 'verify <CODE>' with the code sent to {}", email);
            });
        }
        Some(("verify", m)) => {
            let code = m.get_one::<String>("CODE").unwrap();
            let AuthState::CodeSent(email) = shell.client.auth().state().clone() else {
                println!("Request a code first: login <EMAIL>");
                return;
            };
            if shell.client.auth_mut().verify_code(&email, code).await.is_ok() {
                shell.open(Route::Contacts).await;
            }
        }
        Some(("back", _)) => {
            shell.client.auth_mut().back_to_email();
        }
        Some(("logout", _)) => {
            shell.client.auth_mut().logout();
        }
        Some(("me", _)) => {
            shell.client.auth_mut().sync();
            match shell.client.auth().user() {
                Some(user) => {
                    println!("Signed in as:");
                    println!(" name:\t{}", user.name());
                    println!(" email:\t{}", user.email());
                },
                None => println!("Not signed in ({})", shell.client.auth().state()),
            }
            println!(" api:\t{}", shell.client.api().base_url());
        }
        Some(("go", m)) => {
            let path = m.get_one::<String>("PATH").unwrap();
            shell.open(Route::from_path(path)).await;
        }
        Some((cmd, m)) => {
            if !shell.ensure_page() {
                return;
            }
            execute_contact_command(cmd, m, shell).await;
        }
        _ => println!("Unknown command"),
    }
}

async fn execute_contact_command(cmd: &str, m: &ArgMatches, shell: &mut Shell) {
    match cmd {
        "list" => {
            if shell.list.load().await.is_ok() {
                print_contacts(&shell.list);
            }
        }
        "filter" => {
            let mut partial = ContactFilter::new();
            if let Some(v) = m.get_one::<bool>("active") {
                partial = partial.with_only_active(*v);
            }
            if let Some(v) = m.get_one::<bool>("inactive") {
                partial = partial.with_only_inactive(*v);
            }
            if let Some(v) = m.get_one::<bool>("favorites") {
                partial = partial.with_only_favorites(*v);
            }
            if shell.list.update_filters(&partial).await.is_ok() {
                print_contacts(&shell.list);
            }
        }
        "search" => {
            let term = m.get_one::<String>("TERM").map(|v| v.as_str()).unwrap_or("");
            shell.list.set_search(term);
            print_contacts(&shell.list);
        }
        "show" => {
            let id = *m.get_one::<u64>("ID").unwrap();
            _ = shell.client.directory().get(id).await.map(|c| print_contact(&c));
        }
        "add" => {
            let form = ContactForm::new(
                m.get_one::<String>("NAME").unwrap(),
                m.get_one::<String>("EMAIL").unwrap(),
                m.get_one::<String>("MOBILE").unwrap(),
                m.get_one::<String>("landline").map(|v| v.as_str()).unwrap_or(""),
            );
            _ = shell.list.save(None, &form).await.map_err(|e| {
                println!("Error: {e}");
            }).map(|c| {
                println!("Contact #{} created.", c.id());
            });
        }
        "edit" => {
            let id = *m.get_one::<u64>("ID").unwrap();
            let current = match shell.list.contact(id).cloned() {
                Some(v) => v,
                None => match shell.client.directory().get(id).await {
                    Ok(v) => v,
                    Err(_) => return,
                }
            };

            let mut form = ContactForm::from_contact(&current);
            if let Some(name) = m.get_one::<String>("name") {
                form.name = name.clone();
            }
            if let Some(email) = m.get_one::<String>("email") {
                form.email = email.clone();
            }
            if let Some(landline) = m.get_one::<String>("landline") {
                form.landline = format::sanitize_phone_input(landline, format::LANDLINE_DIGITS);
            }

            _ = shell.list.save(Some(id), &form).await.map_err(|e| {
                println!("Error: {e}");
            });
        }
        "fav" => {
            let id = *m.get_one::<u64>("ID").unwrap();
            _ = shell.list.toggle_favorite(id).await;
        }
        "deactivate" => {
            let id = *m.get_one::<u64>("ID").unwrap();
            _ = shell.list.deactivate(id).await;
        }
        "reactivate" => {
            let id = *m.get_one::<u64>("ID").unwrap();
            _ = shell.list.reactivate(id).await;
        }
        _ => println!("Unknown command"),
    }
}

/// Splits a command line on whitespace, keeping double-quoted runs together.
fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in input.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        args.push(current);
    }
    args
}

/// The words of an input line, or `None` when there is nothing to run.
fn command_args(line: &str) -> Option<Vec<String>> {
    let args = split_args(line.trim());
    match args.is_empty() {
        true => None,
        false => Some(args),
    }
}

struct NoticePrinter;
impl NoticeListener for NoticePrinter {
    fn on_notice(&self, notice: &Notice) {
        println!("{}", notice);
    }
}

struct SessionPrinter;
impl SessionListener for SessionPrinter {
    fn on_code_sent(&self, email: &str) {
        println!("Code sent to {}", email);
    }

    fn on_authenticated(&self, user: &User) {
        println!("Signed in as {}", user);
    }

    fn on_logged_out(&self) {
        println!("Session ended.");
    }
}

#[derive(Parser, Debug)]
#[command(name = "contatos")]
#[command(version = "1.0")]
#[command(about = "Interactive contacts directory shell", long_about = None)]
struct Options {
    /// The configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// The backend url, overriding the configuration
    #[arg(short, long, value_name = "URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() {
    let opts = Options::parse();
    let mut builder = cfg::Builder::new();
    if let Some(path) = opts.config.as_ref() {
        if let Err(e) = builder.load(path) {
            eprintln!("Loading config error: {e}");
            return;
        }
    }
    if let Some(url) = opts.api_url.as_ref() {
        builder.with_api_url(url);
    }

    let cfg = match builder.build() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return;
        }
    };

    #[cfg(feature = "inspect")] {
        cfg.dump();
    }

    logger::setup(cfg.log_level(), cfg.log_file());
    if cfg.log_file().is_some() {
        logger::revert_console_output();
    }

    let result = ClientBuilder::new()
        .with_config(cfg.as_ref())
        .with_notice_listener(NoticePrinter)
        .with_session_listener(SessionPrinter)
        .build();

    let client = match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Creating contacts client error: {e}");
            logger::teardown();
            return;
        }
    };

    let mut shell = Shell::new(client);
    let mut cli = build_cli();
    let mut rl = Reedline::create();

    println!("Welcome to interactive contacts shell. Type 'exit' to quit.\n");
    match shell.client.auth().user() {
        Some(user) => {
            println!("Welcome back, {}!", user.name());
            shell.open(shell.page).await;
        },
        None => println!("Sign in with: login <EMAIL>"),
    }

    loop {
        let prompt = shell.prompt();
        let Ok(sig) = rl.read_line(&prompt) else {
            println!("\n Fatal error occurred.");
            continue;
        };
        match sig {
            Signal::Success(line) => {
                let Some(args) = command_args(&line) else {
                    continue;
                };

                match args[0].as_str() {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    },
                    "help" => {
                        _ = match args.get(1).and_then(|v| cli.find_subcommand_mut(v)) {
                            Some(cmd) => cmd.print_long_help(),
                            None => cli.print_long_help(),
                        };
                        continue;
                    }
                    _ => {}
                }

                let cmd = args.join(" ");
                match cli.clone().try_get_matches_from(args) {
                    Ok(matches) => execute_command(matches, &mut shell).await,
                    Err(_) => {
                        println!("Error: command not found or bad arguments: '{}'", cmd);
                    }
                }
            }
            Signal::CtrlC | Signal::CtrlD => {
                println!("\nGoodbye!");
                break;
            }
        }
    }

    logger::teardown();
}
