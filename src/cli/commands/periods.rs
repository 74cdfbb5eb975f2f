use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::calculator::periods::compute_periods_between;
use crate::db::queries::list_downtimes;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{color_for_efficiency, paint};
use crate::utils::date::day_or_today;
use crate::utils::formatting::{fmt_hm, mins2readable};

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    let Commands::Periods { date } = cmd else {
        return Ok(());
    };

    let (pool, _user) = ctx.session()?;
    let day = day_or_today(date.as_deref(), ctx.now)?;
    let schedule = ctx.cfg.schedule()?;

    let Some(window) = schedule.window_for(day) else {
        info(format!("No production on {} ({}).", day, day.format("%A")));
        return Ok(());
    };

    let events = list_downtimes(&pool.conn)?;
    let periods = compute_periods_between(&events, day, day, ctx.now, &schedule);

    header(format!("Production periods {} ({})", day, window.label()));

    if periods.is_empty() {
        info("No post assigned yet.");
        return Ok(());
    }

    let mut t = ctx.table(&["Post", "Start", "End", "Duration", "Downtime", "Pause", "Efficiency"]);
    for p in &periods {
        let eff = p.efficiency();
        t.add_row(vec![
            if p.continued {
                format!("{} (continued)", p.post_number)
            } else {
                p.post_number.clone()
            },
            fmt_hm(&p.start_time),
            fmt_hm(&p.end_time),
            mins2readable(p.duration_minutes, false, true),
            mins2readable(p.total_downtime_minutes, false, true),
            mins2readable(p.total_pause_minutes, false, true),
            format!("{eff}%"),
        ]);
    }
    print!("{}", t.render());

    if let Some(last) = periods.last() {
        let eff = last.efficiency();
        println!(
            "\nCurrent post {}: {}",
            last.post_number,
            paint(color_for_efficiency(eff), &format!("{eff}%"))
        );
    }

    Ok(())
}
