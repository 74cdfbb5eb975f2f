use crate::cli::commands::Context;
use crate::cli::parser::Commands;
use crate::core::calculator::periods::list_downtimes_by_post;
use crate::db::queries::list_downtimes;
use crate::errors::AppResult;
use crate::export::range::parse_range;
use crate::ui::messages::{header, info};
use crate::utils::formatting::{fmt_day_hm, mins2readable};

pub fn handle(cmd: &Commands, ctx: &Context) -> AppResult<()> {
    let Commands::Posts { period } = cmd else {
        return Ok(());
    };

    let (pool, _user) = ctx.session()?;

    let (from, to) = match period {
        Some(p) => parse_range(p)?,
        None => (ctx.now.date(), ctx.now.date()),
    };

    let events = list_downtimes(&pool.conn)?;
    let groups = list_downtimes_by_post(&events, from, to);

    if groups.is_empty() {
        info("No downtimes found.");
        return Ok(());
    }

    for g in &groups {
        let title = match (&g.post_number, g.continued) {
            (Some(p), true) => format!("Post {p} (continued)"),
            (Some(p), false) => format!("Post {p}"),
            (None, _) => "No post assigned".to_string(),
        };
        header(title);

        let mut t = ctx.table(&["ID", "Machine", "Start", "Min", "Comment"]);
        for e in &g.rows {
            let machine = if e.is_marker_machine() {
                format!("» {}", e.machine_name)
            } else {
                e.machine_name.clone()
            };
            t.add_row(vec![
                e.id.to_string(),
                machine,
                fmt_day_hm(&e.start_time),
                e.duration_minutes.to_string(),
                e.comment.clone(),
            ]);
        }
        print!("{}", t.render());

        println!(
            "Downtime: {}   Pause: {}\n",
            mins2readable(g.total_downtime_minutes, false, true),
            mins2readable(g.total_pause_minutes, false, true)
        );
    }

    Ok(())
}
