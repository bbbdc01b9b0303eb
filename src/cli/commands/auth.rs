use crate::cli::parser::AuthAction;
use crate::config::Config;
use crate::core::auth::AuthLogic;
use crate::db::officers;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, GREY, RESET};

pub fn handle(action: &AuthAction, cfg: &Config) -> AppResult<()> {
    let pool = super::open_db(cfg)?;

    match action {
        AuthAction::Signup {
            name,
            email,
            password,
        } => {
            let officer = AuthLogic::signup(&pool.conn, cfg, name, email, password)?;
            success(format!(
                "Account created. Signed in as {} <{}>",
                officer.full_name, officer.email
            ));
        }
        AuthAction::Signin { email, password } => {
            let officer = AuthLogic::signin(&pool.conn, cfg, email, password)?;
            success(format!("Welcome back, {}!", officer.full_name));
        }
        AuthAction::Signout => {
            if AuthLogic::signout(&pool.conn)? {
                success("Signed out.");
            } else {
                info("Nobody was signed in.");
            }
        }
        AuthAction::Whoami => match officers::active_officer(&pool.conn)? {
            Some((officer, since)) => {
                println!("{}{}{} <{}>", CYAN, officer.full_name, RESET, officer.email);
                println!("{}signed in since {}{}", GREY, since, RESET);
            }
            None => info("Not signed in."),
        },
    }

    Ok(())
}
