use std::io::{BufRead, Write};

use chrono::{Local, NaiveDateTime, SubsecRound};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{handler::user::register_user, model::user::CreateUserRequest, terminal::Terminal};

pub mod admin;
pub mod user;

const MAIN_MENU: &str = "\n==== SMART PARK ====\n\
1. Register Customer\n\
2. User Login\n\
3. Admin Login\n\
4. Exit System";

/// Runs the main menu until the user exits or input ends, then saves.
pub fn run_main_menu<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    loop {
        term.say(MAIN_MENU)?;
        // 入力の終わりは Exit と同じ扱い
        let choice = match term.prompt("Enter choice") {
            Ok(choice) => choice,
            Err(AppError::InputClosed) => break,
            Err(e) => return Err(e),
        };
        let outcome = match choice.as_str() {
            "1" => register(registry, term),
            "2" => user::login(registry, term),
            "3" => admin::login(registry, term),
            "4" => break,
            _ => Err(invalid_choice()),
        };
        match settle(term, outcome) {
            Ok(()) => {}
            Err(AppError::InputClosed) => break,
            Err(e) => return Err(e),
        }
    }

    checkpoint(registry, term)?;
    term.say("Goodbye!")
}

fn register<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    let req = CreateUserRequest::new(
        term.prompt("Name")?,
        term.prompt("Phone (11 digits)")?,
        term.prompt("Email")?,
        term.prompt("Password")?,
    );
    let user_id = register_user(registry, req, now())?;
    checkpoint(registry, term)?;
    term.say(format!("Registration successful! Your user ID is {user_id}."))
}

pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

pub(crate) fn invalid_choice() -> AppError {
    AppError::InvalidInput("Invalid choice! Please try again.".into())
}

/// Prints a failed action and returns to the menu. Terminal failures and
/// end of input are passed back to the caller.
pub(crate) fn settle<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    outcome: AppResult<()>,
) -> AppResult<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(e @ (AppError::InputClosed | AppError::TerminalError(_))) => Err(e),
        Err(e) => {
            if e.is_user_facing() {
                tracing::warn!(error.message = %e, "operation rejected");
            } else {
                tracing::error!(error.cause_chain = ?e, error.message = %e, "operation failed");
            }
            term.say(format!("Error: {e}"))
        }
    }
}

// 保存に失敗してもメモリ上の状態で処理を続ける
pub(crate) fn checkpoint<R: BufRead, W: Write>(
    registry: &AppRegistry,
    term: &mut Terminal<R, W>,
) -> AppResult<()> {
    if let Err(e) = registry.persist() {
        tracing::error!(error.cause_chain = ?e, error.message = %e, "failed to save data");
        term.say(format!(
            "Warning: {e}. Changes are kept in memory for this session."
        ))?;
    }
    Ok(())
}

pub(crate) fn say_list<R: BufRead, W: Write, T: std::fmt::Display>(
    term: &mut Terminal<R, W>,
    items: impl IntoIterator<Item = T>,
    empty: &str,
) -> AppResult<usize> {
    let mut count = 0;
    for item in items {
        count += 1;
        term.say(format!("{count:>3}. {item}"))?;
    }
    if count == 0 {
        term.say(empty)?;
    }
    Ok(count)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::handler::fixture::registry;
    use adapter::database::connect_database_with;
    use shared::config::StorageConfig;
    use std::{fs, io::Cursor};
    use tempfile::tempdir;

    pub(crate) fn run_script(registry: &AppRegistry, script: &str) -> String {
        let mut term = Terminal::new(Cursor::new(script.as_bytes()), Vec::new());
        run_main_menu(registry, &mut term).unwrap();
        String::from_utf8(term.into_output()).unwrap()
    }

    #[test]
    fn invalid_choice_returns_to_the_menu() {
        let out = run_script(&registry(), "9\n4\n");
        assert!(out.contains("Error: Invalid choice! Please try again."));
        assert_eq!(out.matches("1. Register Customer").count(), 2);
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn end_of_input_exits_cleanly() {
        let out = run_script(&registry(), "1\nRahim\n");
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn rejected_registration_is_reported() {
        let registry = registry();
        let out = run_script(&registry, "1\nRahim\n123\nrahim@mail.com\npw\n4\n");
        assert!(out.contains("Invalid phone number!"));
        assert!(registry.user_repository().find_all().unwrap().is_empty());
    }

    #[test]
    fn registration_is_written_to_the_data_files() {
        let dir = tempdir().unwrap();
        let cfg = StorageConfig::new(dir.path());
        let registry = AppRegistry::new(
            connect_database_with(&cfg).unwrap(),
            crate::handler::fixture::app_config(false),
        );

        let mut term = Terminal::new(
            Cursor::new("1\nRahim\n01712345678\nrahim@mail.com\npw\n".as_bytes()),
            Vec::new(),
        );
        run_main_menu(&registry, &mut term).unwrap();
        let users = fs::read_to_string(cfg.users_path()).unwrap();
        assert!(users.starts_with("1 Rahim 01712345678 rahim@mail.com pw "));
        assert!(users.trim_end().ends_with(" 1"));
        assert_eq!(fs::read_to_string(cfg.slots_path()).unwrap().lines().count(), 100);
    }
}
