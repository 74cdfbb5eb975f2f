use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::calculator::periods::split_totals;
use crate::db::queries::list_downtimes;
use crate::errors::AppResult;
use crate::export::range::parse_range;
use crate::models::downtime::DowntimeEvent;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{fmt_day_hm, mins2readable, post_or_dash};

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    let Commands::List {
        period,
        active,
        machine,
    } = cmd
    else {
        return Ok(());
    };

    let (pool, _user) = ctx.session()?;

    let (from, to) = match period {
        Some(p) => parse_range(p)?,
        None => (ctx.now.date(), ctx.now.date()),
    };

    let events = list_downtimes(&pool.conn)?;
    let rows: Vec<&DowntimeEvent> = events
        .iter()
        .filter(|e| {
            if *active {
                return e.is_active();
            }
            let d = e.start_time.date();
            d >= from && d <= to
        })
        .filter(|e| {
            machine
                .as_deref()
                .is_none_or(|m| e.machine_name.eq_ignore_ascii_case(m.trim()))
        })
        .collect();

    if rows.is_empty() {
        info("No downtimes found.");
        return Ok(());
    }

    if *active {
        header("Running downtimes");
    } else if from == to {
        header(format!("Downtimes {from}"));
    } else {
        header(format!("Downtimes {from} → {to}"));
    }

    let mut t = ctx.table(&["ID", "Machine", "Start", "End", "Min", "Post", "Operator", "Comment"]);
    for e in &rows {
        t.add_row(vec![
            e.id.to_string(),
            e.machine_name.clone(),
            fmt_day_hm(&e.start_time),
            e.end_time.as_ref().map(fmt_day_hm).unwrap_or_else(|| "running".into()),
            e.duration_minutes.to_string(),
            post_or_dash(e.post_label()),
            e.operator_name.clone(),
            e.comment.clone(),
        ]);
    }
    print!("{}", t.render());

    let (down, pause) = split_totals(rows.iter().copied());
    println!(
        "\nTotal downtime: {}   pause: {}",
        mins2readable(down, false, false),
        mins2readable(pause, false, false)
    );

    Ok(())
}
