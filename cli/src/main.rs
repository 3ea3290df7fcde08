//! Interactive terminal front end for the donelist stores.
//!
//! This is the view-layer stand-in: it wires the auth, todo and theme
//! stores to a small command loop, renders their state, and reacts to
//! terminal actions the way a page would (navigate on login, stay on the
//! form on failure, show inline errors).

mod config;
mod storage;

use anyhow::Result;
use donelist_api::{ApiClient, CreateTodo, UpdateTodo};
use donelist_client::bridge::spawn_invalidation_bridge;
use donelist_client::routes::{self, Resolution, Route};
use donelist_client::theme::{ThemeAction, ThemeEnvironment, ThemeReducer, ThemeState};
use donelist_client::{
    AuthAction, AuthEnvironment, AuthReducer, AuthState, AuthStore, TodoAction, TodoEnvironment,
    TodoListState, TodoStore, TodosReducer,
};
use donelist_core::environment::Storage;
use donelist_runtime::Store;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;

use config::Config;
use storage::FileStorage;

type Auth = AuthStore<ApiClient>;
type Todos = TodoStore<ApiClient>;

/// Longer than the API timeout so terminal actions always arrive first
const OP_TIMEOUT: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(&config.state_file)?);

    let api = ApiClient::new(config.api_url.clone(), Arc::clone(&storage))?;

    let auth: Auth = Store::new(
        AuthState::default(),
        AuthReducer::new(),
        AuthEnvironment::new(api.clone(), Arc::clone(&storage)),
    );
    let todos: Todos = Store::new(
        TodoListState::default(),
        TodosReducer::new(),
        TodoEnvironment::new(api.clone()),
    );
    let theme = Store::new(
        ThemeState::default(),
        ThemeReducer::new(),
        ThemeEnvironment::new(Arc::clone(&storage)),
    );

    let _bridge = spawn_invalidation_bridge(auth.clone(), api.subscribe_invalidations());

    // Rehydrate once at startup, before the first prompt
    let mut handle = auth.send(AuthAction::Initialize).await?;
    handle.wait().await;
    theme.send(ThemeAction::Initialize).await?;

    println!("donelist - {}", config.api_url);
    print_status(&auth).await;
    println!("Type 'help' for commands.");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        match command {
            "help" => print_help(),
            "signup" => signup(&auth, &args).await,
            "login" => login(&auth, &todos, &args).await,
            "logout" => {
                let _ = auth.send(AuthAction::Logout).await;
                println!("logged out");
            }
            "whoami" => print_status(&auth).await,
            "list" => {
                if guard(&auth).await {
                    let page = args.first().and_then(|raw| raw.parse().ok()).unwrap_or(1);
                    fetch_and_print(&todos, page).await;
                }
            }
            "add" => {
                if guard(&auth).await {
                    add(&todos, &args.join(" ")).await;
                }
            }
            "done" | "undone" => {
                if guard(&auth).await {
                    toggle(&todos, args.first().copied()).await;
                }
            }
            "edit" => {
                if guard(&auth).await {
                    edit(&todos, &args).await;
                }
            }
            "rm" => {
                if guard(&auth).await {
                    remove(&todos, args.first().copied()).await;
                }
            }
            "show" => {
                if guard(&auth).await {
                    show(&api, args.first().copied()).await;
                }
            }
            "stats" => print_stats(&todos).await,
            "bydate" => print_by_date(&todos).await,
            "theme" => {
                let _ = theme.send(ThemeAction::Toggle).await;
                println!("theme: {}", theme.state(|s| s.theme).await);
            }
            "quit" | "exit" => break,
            other => println!("unknown command '{other}', try 'help'"),
        }
    }

    // Let in-flight effects settle before the process ends
    let _ = auth.shutdown(Duration::from_secs(5)).await;
    let _ = todos.shutdown(Duration::from_secs(5)).await;
    let _ = theme.shutdown(Duration::from_secs(5)).await;

    Ok(())
}

fn print_help() {
    println!("  signup <name> <email> <password>");
    println!("  login <email> <password>");
    println!("  logout | whoami");
    println!("  list [page] | show <id> | add <title> | edit <id> <title> | done <id> | rm <id>");
    println!("  stats | bydate | theme");
    println!("  quit");
}

async fn print_status(auth: &Auth) {
    let state = auth.state(Clone::clone).await;
    match state.user {
        Some(user) => println!("signed in as {} <{}>", user.name, user.email),
        None => println!("not signed in"),
    }
}

/// Route-guard the todo commands the way `/todos` is guarded
async fn guard(auth: &Auth) -> bool {
    let state = auth.state(Clone::clone).await;
    match routes::resolve(Route::Todos, &state) {
        Resolution::Allow(_) => true,
        Resolution::Pending => {
            println!("still checking your session, try again in a moment");
            false
        }
        Resolution::Redirect(_) => {
            println!("please log in first");
            false
        }
    }
}

async fn signup(auth: &Auth, args: &[&str]) {
    let [name, email, password] = args.as_ref() else {
        println!("usage: signup <name> <email> <password>");
        return;
    };

    let result = auth
        .send_and_wait_for(
            AuthAction::Signup {
                name: (*name).to_string(),
                email: (*email).to_string(),
                password: (*password).to_string(),
            },
            |a| {
                matches!(
                    a,
                    AuthAction::SignupSucceeded | AuthAction::SignupFailed { .. }
                )
            },
            OP_TIMEOUT,
        )
        .await;

    match result {
        Ok(AuthAction::SignupSucceeded) => println!("account created - you can log in now"),
        Ok(AuthAction::SignupFailed { message }) => println!("signup failed: {message}"),
        Ok(_) => {}
        Err(err) => println!("signup did not complete: {err}"),
    }
}

async fn login(auth: &Auth, todos: &Todos, args: &[&str]) {
    let [email, password] = args.as_ref() else {
        println!("usage: login <email> <password>");
        return;
    };

    let result = auth
        .send_and_wait_for(
            AuthAction::Login {
                email: (*email).to_string(),
                password: (*password).to_string(),
            },
            |a| {
                matches!(
                    a,
                    AuthAction::LoginSucceeded { .. } | AuthAction::LoginFailed { .. }
                )
            },
            OP_TIMEOUT,
        )
        .await;

    match result {
        Ok(AuthAction::LoginSucceeded { user, .. }) => {
            println!("welcome back, {}", user.name);
            // "Navigate" to the todos page
            fetch_and_print(todos, 1).await;
        }
        Ok(AuthAction::LoginFailed { message }) => println!("login failed: {message}"),
        Ok(_) => {}
        Err(err) => println!("login did not complete: {err}"),
    }
}

async fn fetch_and_print(todos: &Todos, page: u32) {
    let result = todos
        .send_and_wait_for(
            TodoAction::Fetch { page },
            |a| matches!(a, TodoAction::Fetched { .. } | TodoAction::FetchFailed { .. }),
            OP_TIMEOUT,
        )
        .await;

    match result {
        Ok(TodoAction::FetchFailed { message }) => println!("error: {message}"),
        Ok(_) => print_list(todos).await,
        Err(err) => println!("fetch did not complete: {err}"),
    }
}

async fn print_list(todos: &Todos) {
    let state = todos.state(Clone::clone).await;
    if state.todos.is_empty() {
        println!("no todos on page {}", state.current_page);
        return;
    }

    for todo in &state.todos {
        let mark = if todo.completed { "x" } else { " " };
        println!("  [{mark}] {}  {}", todo.id, todo.title);
    }
    println!("page {}, {} shown", state.current_page, state.total_count);
}

async fn add(todos: &Todos, title: &str) {
    if title.is_empty() {
        println!("usage: add <title>");
        return;
    }

    let result = todos
        .send_and_wait_for(
            TodoAction::Add {
                data: CreateTodo {
                    title: Some(title.to_string()),
                    description: None,
                },
            },
            |a| matches!(a, TodoAction::Added { .. } | TodoAction::AddFailed { .. }),
            OP_TIMEOUT,
        )
        .await;

    match result {
        Ok(TodoAction::Added { todo }) => println!("added {}", todo.id),
        Ok(TodoAction::AddFailed { message }) => println!("error: {message}"),
        Ok(_) => {}
        Err(err) => println!("add did not complete: {err}"),
    }
}

async fn toggle(todos: &Todos, id: Option<&str>) {
    let Some(id) = id else {
        println!("usage: done <id>");
        return;
    };

    let result = todos
        .send_and_wait_for(
            TodoAction::Toggle { id: id.to_string() },
            |a| matches!(a, TodoAction::Updated { .. } | TodoAction::ToggleFailed { .. }),
            OP_TIMEOUT,
        )
        .await;

    match result {
        Ok(TodoAction::Updated { todo, .. }) => {
            let status = if todo.completed { "done" } else { "open" };
            println!("{} is now {status}", todo.id);
        }
        Ok(TodoAction::ToggleFailed { message }) => println!("error: {message}"),
        Ok(_) => {}
        Err(err) => println!("toggle did not complete: {err}"),
    }
}

async fn edit(todos: &Todos, args: &[&str]) {
    let Some((id, title)) = args.split_first().map(|(id, rest)| (*id, rest.join(" "))) else {
        println!("usage: edit <id> <title>");
        return;
    };
    if title.is_empty() {
        println!("usage: edit <id> <title>");
        return;
    }

    let result = todos
        .send_and_wait_for(
            TodoAction::Update {
                id: id.to_string(),
                updates: UpdateTodo {
                    title: Some(title),
                    ..UpdateTodo::default()
                },
            },
            |a| matches!(a, TodoAction::Updated { .. } | TodoAction::UpdateFailed { .. }),
            OP_TIMEOUT,
        )
        .await;

    match result {
        Ok(TodoAction::Updated { id, .. }) => println!("updated {id}"),
        Ok(TodoAction::UpdateFailed { message }) => println!("error: {message}"),
        Ok(_) => {}
        Err(err) => println!("edit did not complete: {err}"),
    }
}

async fn remove(todos: &Todos, id: Option<&str>) {
    let Some(id) = id else {
        println!("usage: rm <id>");
        return;
    };

    let result = todos
        .send_and_wait_for(
            TodoAction::Delete { id: id.to_string() },
            |a| matches!(a, TodoAction::Deleted { .. } | TodoAction::DeleteFailed { .. }),
            OP_TIMEOUT,
        )
        .await;

    match result {
        Ok(TodoAction::Deleted { id }) => println!("deleted {id}"),
        Ok(TodoAction::DeleteFailed { message }) => println!("error: {message}"),
        Ok(_) => {}
        Err(err) => println!("delete did not complete: {err}"),
    }
}

/// Detail view: the one read that goes straight to the adapter, like a
/// detail page fetching outside the collection store
async fn show(api: &ApiClient, id: Option<&str>) {
    let Some(id) = id else {
        println!("usage: show <id>");
        return;
    };

    match api.get_todo(id).await {
        Ok(todo) => {
            let status = if todo.completed { "done" } else { "open" };
            println!("{}  [{status}]", todo.id);
            println!("  title:       {}", todo.title);
            if !todo.description.is_empty() {
                println!("  description: {}", todo.description);
            }
            println!("  created:     {}", todo.created_at);
            println!("  updated:     {}", todo.updated_at);
        }
        Err(err) => println!("error: {}", err.user_message("Failed to fetch todo")),
    }
}

async fn print_stats(todos: &Todos) {
    let stats = todos.state(TodoListState::stats).await;
    println!(
        "total {}  done {}  open {}  on-time {}  overtime {}",
        stats.total, stats.completed, stats.uncompleted, stats.on_time, stats.overtime
    );
}

async fn print_by_date(todos: &Todos) {
    let grouped = todos.state(TodoListState::todos_by_date).await;
    if grouped.is_empty() {
        println!("nothing fetched yet - try 'list'");
        return;
    }

    for (date, group) in grouped {
        println!("{date}");
        for todo in group {
            let mark = if todo.completed { "x" } else { " " };
            println!("  [{mark}] {}", todo.title);
        }
    }
}
