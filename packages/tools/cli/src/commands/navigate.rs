//! 페이지 이동 명령어
//!
//! 브라우저의 주소 입력에 해당합니다. 가드를 거친 뒤 최종 화면을 출력합니다.

use raul_core::router::{Resolved, View};

use crate::context::App;
use crate::OutputFormat;

use super::winners::print_winners;

pub async fn open(app: &App, path: &str) -> anyhow::Result<()> {
    let (route, redirects) = match app.router.navigate(path).await {
        Resolved::Render { route, redirects } => (route, redirects),
        Resolved::NotFound { path } => {
            return Err(anyhow::anyhow!("No page at {}", path));
        }
        Resolved::TooManyRedirects { path } => {
            return Err(anyhow::anyhow!("Navigation did not settle (last target: {})", path));
        }
    };

    if let OutputFormat::Text = app.format {
        for hop in &redirects {
            println!("-> redirected to {}", hop);
        }
        println!("[{}] {}", route.view, route.path);
    }

    match route.view {
        View::Login => {
            println!("Not logged in. Use 'raul login' to sign in.");
            Ok(())
        }
        View::Home => {
            let winners = app.winners.current().await?;
            print_winners(app, "This week's winners", &winners)
        }
        View::AllWinners => {
            let winners = app.winners.all().await?;
            print_winners(app, "All winners", &winners)
        }
        View::Archive => {
            let winners = app.winners.archive().await?;
            print_winners(app, "Archive", &winners)
        }
        View::Admin => {
            if !app.auth.is_admin() {
                println!("Admin role required for create/update/delete.");
            }
            let winners = app.winners.latest().await?;
            print_winners(app, "Latest winners", &winners)
        }
    }
}
