//! 수상자 조회 명령어

use chrono::{Local, NaiveDate};
use raul_core::api::WeeklyWinner;
use raul_core::router::View;
use raul_core::week;

use crate::context::App;
use crate::OutputFormat;

pub async fn current(app: &App) -> anyhow::Result<()> {
    app.enter("/", View::Home).await?;
    let sunday = week::current_sunday(Local::now().date_naive());
    let winners = app.winners.current().await?;
    print_winners(app, &format!("Winners for the week of {}", sunday), &winners)
}

pub async fn latest(app: &App) -> anyhow::Result<()> {
    app.enter("/", View::Home).await?;
    let winners = app.winners.latest().await?;
    print_winners(app, "Latest winners", &winners)
}

pub async fn all(app: &App) -> anyhow::Result<()> {
    app.enter("/winners", View::AllWinners).await?;
    let winners = app.winners.all().await?;
    print_winners(app, "All winners", &winners)
}

pub async fn archive(app: &App) -> anyhow::Result<()> {
    app.enter("/archive", View::Archive).await?;
    let winners = app.winners.archive().await?;
    print_winners(app, "Archive", &winners)
}

pub async fn by_date(app: &App, date: Option<NaiveDate>) -> anyhow::Result<()> {
    app.enter("/winners", View::AllWinners).await?;
    let date = date.unwrap_or_else(|| week::current_sunday(Local::now().date_naive()));
    if !week::is_sunday(date) {
        // 서버는 일요일이 아니면 빈 목록을 반환
        eprintln!("Note: {} is not a Sunday", date);
    }
    let winners = app.winners.by_date(date).await?;
    print_winners(app, &format!("Winners for {}", date), &winners)
}

pub async fn by_type(app: &App, kind: &str) -> anyhow::Result<()> {
    app.enter("/winners", View::AllWinners).await?;
    let winners = app.winners.by_type(kind).await?;
    print_winners(app, &format!("{} winners", kind), &winners)
}

pub fn print_winners(app: &App, title: &str, winners: &[WeeklyWinner]) -> anyhow::Result<()> {
    if let OutputFormat::Json = app.format {
        println!("{}", serde_json::to_string_pretty(winners)?);
        return Ok(());
    }

    println!("{}:", title);
    if winners.is_empty() {
        println!("  No winners.");
        return Ok(());
    }

    for winner in winners {
        println!("- {} {} (#{})", winner.sunday_date, winner.kind, winner.id);
        match &winner.image {
            Some(image) => {
                println!(
                    "  image {}: {}",
                    image.id,
                    image.title.as_deref().unwrap_or("(untitled)")
                );
                println!("  url: {}", app.images.image_url(image.id));
            }
            None => println!("  image: (none)"),
        }
    }
    Ok(())
}
