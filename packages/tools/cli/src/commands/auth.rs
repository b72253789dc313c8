//! 인증 명령어

use raul_core::router::{Resolved, View, LOGIN_PATH};

use crate::context::App;
use crate::OutputFormat;

pub async fn login(app: &App, username: Option<String>, password: Option<String>) -> anyhow::Result<()> {
    // 세션이 유효하면 로그인 화면 대신 기본 페이지로 이동
    if !login_screen_shown(app.router.navigate(LOGIN_PATH).await)? {
        println!("Already logged in.");
        return Ok(());
    }

    let username = match username {
        Some(u) => u,
        None => inquire::Text::new("Username:").prompt()?,
    };
    let password = match password {
        Some(p) => p,
        None => password_prompt().prompt()?,
    };
    if username.is_empty() || password.is_empty() {
        return Err(anyhow::anyhow!("Username and password are required"));
    }

    if app.auth.login(&username, &password).await {
        println!("Logged in as {}", username);
        if let Some(role) = app.auth.role() {
            println!("Role: {}", role);
        }
        Ok(())
    } else {
        Err(anyhow::anyhow!("Login failed. Check your credentials and the API URL ({})", app.config.api_url))
    }
}

pub async fn logout(app: &App) -> anyhow::Result<()> {
    app.auth.logout();
    println!("Logged out.");
    Ok(())
}

pub async fn whoami(app: &App) -> anyhow::Result<()> {
    let valid = app.auth.validate_token().await;
    let role = app.auth.role();

    match app.format {
        OutputFormat::Json => {
            let out = serde_json::json!({
                "loggedIn": valid,
                "role": role,
                "apiUrl": app.config.api_url,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            if valid {
                println!("Logged in (role: {})", role.as_deref().unwrap_or("(none)"));
            } else {
                println!("Not logged in");
            }
        }
    }
    Ok(())
}

// 입력 내용을 화면에 출력하지 않음
fn password_prompt() -> inquire::Password<'static> {
    inquire::Password::new("Password:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Hidden)
}

/// 로그인 화면이 렌더링됐는지 판단
///
/// 기본 페이지로 리다이렉트된 경우만 `false`이고, 그 외의 결과는 에러입니다.
fn login_screen_shown(resolved: Resolved) -> anyhow::Result<bool> {
    match resolved {
        Resolved::Render { route, .. } if route.view == View::Login => Ok(true),
        Resolved::Render { route, .. } if route.view == View::Home => Ok(false),
        Resolved::Render { route, .. } => {
            Err(anyhow::anyhow!("Unexpected page {} ({})", route.path, route.view))
        }
        Resolved::NotFound { path } => Err(anyhow::anyhow!("No page at {}", path)),
        Resolved::TooManyRedirects { path } => {
            Err(anyhow::anyhow!("Navigation did not settle (last target: {})", path))
        }
    }
}
