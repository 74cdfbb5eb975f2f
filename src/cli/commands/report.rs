use crate::cli::commands::Context;
use crate::cli::parser::{Commands, ReportKind};
use crate::core::auth::AuthLogic;
use crate::core::calculator::periods::compute_periods_between;
use crate::core::calculator::reports::{MachineTotals, daily_report, post_efficiency, weekly_report};
use crate::db::queries::list_downtimes;
use crate::errors::AppResult;
use crate::models::role::Role;
use crate::ui::messages::{header, info};
use crate::utils::date::day_or_today;
use crate::utils::formatting::{fmt_hm, mins2readable};

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    let Commands::Report { kind, date } = cmd else {
        return Ok(());
    };

    let (pool, user) = ctx.session()?;
    AuthLogic::require(&user, Role::can_manage, "read reports")?;

    let day = day_or_today(date.as_deref(), ctx.now)?;
    let events = list_downtimes(&pool.conn)?;

    match kind {
        ReportKind::Daily => {
            let report = daily_report(&events, day);
            header(format!("Daily report {} ({})", report.day, report.day.format("%A")));

            print_machines(ctx, &report.machines);
            println!(
                "\nTotal downtime: {}   pause: {}   running: {}",
                mins2readable(report.total_downtime_minutes, false, false),
                mins2readable(report.total_pause_minutes, false, false),
                report.active
            );

            let periods = compute_periods_between(&events, day, day, ctx.now, &ctx.cfg.schedule()?);
            let rows = post_efficiency(&periods);
            if !rows.is_empty() {
                println!();
                let mut t = ctx.table(&["Post", "From", "To", "Downtime", "Efficiency"]);
                for r in rows {
                    t.add_row(vec![
                        r.post_number,
                        fmt_hm(&r.start_time),
                        fmt_hm(&r.end_time),
                        mins2readable(r.downtime_minutes, false, true),
                        format!("{}%", r.efficiency),
                    ]);
                }
                print!("{}", t.render());
            }
        }
        ReportKind::Weekly => {
            let report = weekly_report(&events, day);
            header(format!("Weekly report {} → {}", report.week_start, report.week_end));

            let mut t = ctx.table(&["Day", "Stops", "Downtime", "Pause"]);
            for d in &report.days {
                t.add_row(vec![
                    d.day.format("%a %Y-%m-%d").to_string(),
                    d.stops.to_string(),
                    mins2readable(d.downtime_minutes, false, true),
                    mins2readable(d.pause_minutes, false, true),
                ]);
            }
            print!("{}", t.render());

            println!();
            print_machines(ctx, &report.machines);
            println!(
                "\nTotal downtime: {}   pause: {}",
                mins2readable(report.total_downtime_minutes, false, false),
                mins2readable(report.total_pause_minutes, false, false)
            );
        }
    }

    Ok(())
}

fn print_machines(ctx: &Context, machines: &[MachineTotals]) {
    if machines.is_empty() {
        info("No downtimes recorded.");
        return;
    }

    let mut t = ctx.table(&["Machine", "Stops", "Running", "Downtime", "Pause"]);
    for m in machines {
        t.add_row(vec![
            m.machine.clone(),
            m.stops.to_string(),
            m.active.to_string(),
            mins2readable(m.downtime_minutes, false, true),
            mins2readable(m.pause_minutes, false, true),
        ]);
    }
    print!("{}", t.render());
}
