//! Offline replay of a work/idle script.
//!
//! The engine is driven by a virtual clock advancing one `check_interval` per
//! tick, so an hour of activity replays in well under a second. The user is
//! continuously active for `--active` minutes and then idle for `--idle`
//! minutes.

use crate::libs::config::{Config, TimerConfig};
use crate::libs::engine::Engine;
use crate::libs::formatter::FormattedFrame;
use crate::libs::idle::ManualIdleSource;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_info, msg_print};
use anyhow::Result;
use chrono::{Duration, Local, NaiveDateTime};
use clap::Args;
use prettytable::{row, Table};

#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Minutes of continuous activity
    #[arg(long)]
    active: u64,

    /// Minutes away from the computer after the activity
    #[arg(long, default_value_t = 0)]
    idle: u64,

    /// Seconds between reported rows; edges are always reported
    #[arg(long, default_value_t = 60)]
    step: u64,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    pub rows: Vec<FormattedFrame>,
    pub shown: usize,
    pub escalated: usize,
    pub hidden: usize,
}

/// Replays `active` of continuous input followed by `idle` of no input.
///
/// A row is recorded every `step` of virtual time and on every reminder edge.
pub fn run_script(config: &TimerConfig, start: NaiveDateTime, active: Duration, idle: Duration, step: Duration) -> SimulationReport {
    let mut engine = Engine::new(config.clone(), start);
    let source = ManualIdleSource::new();
    let tick = config.check_interval();
    let stop_at = start + active;
    let end_at = stop_at + idle;

    let mut report = SimulationReport::default();
    let mut next_row_at = start;
    let mut now = start;
    while now <= end_at {
        if now <= stop_at {
            source.set(Duration::zero());
        } else {
            source.set(now - stop_at);
        }

        let frame = engine.tick(now, &source);
        let directives = &frame.directives;
        report.shown += directives.shown as usize;
        report.escalated += directives.escalation_started as usize;
        report.hidden += directives.hidden as usize;

        let edge = directives.shown || directives.hidden || directives.escalation_started;
        if edge || now >= next_row_at {
            report.rows.push(FormattedFrame::new(now, &frame));
            if now >= next_row_at {
                next_row_at = now + step;
            }
        }

        now += tick;
    }

    report
}

pub fn cmd(args: SimulateArgs) -> Result<()> {
    if args.step == 0 {
        msg_bail_anyhow!(Message::SimulationInvalidStep);
    }

    let config = Config::read()?.timer_or_default();
    msg_print!(Message::SimulationHeader {
        active: args.active,
        idle: args.idle,
    }, true);

    let report = run_script(
        &config,
        Local::now().naive_local(),
        Duration::minutes(args.active as i64),
        Duration::minutes(args.idle as i64),
        Duration::seconds(args.step as i64),
    );

    let mut table = Table::new();
    table.add_row(row!["TIME", "DEBT", "PROJECTED", "REMINDER", "URGENCY", "ESCALATING"]);
    for frame in &report.rows {
        let escalating = if frame.escalating { "yes" } else { "" };
        table.add_row(row![frame.time, frame.debt, frame.projected, frame.message, frame.urgency, escalating]);
    }
    table.printstd();

    msg_info!(Message::SimulationSummary {
        shown: report.shown,
        escalated: report.escalated,
        hidden: report.hidden,
    });

    Ok(())
}
