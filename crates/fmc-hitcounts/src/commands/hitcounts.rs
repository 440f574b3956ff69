//! `get`, `refresh` and `clear` handlers.

use tabled::Tabled;
use tracing::debug;

use fmc_api::{
    Diagnostics, FmcClient, HitCount, HitCountRecord, Identifier, Outcome, PlannedRequest,
    PrefilterAction,
};

use crate::cli::{FilterArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct HitCountRow {
    #[tabled(rename = "Rule")]
    rule: String,
    #[tabled(rename = "Hits")]
    hits: u64,
    #[tabled(rename = "First Hit")]
    first_hit: String,
    #[tabled(rename = "Last Hit")]
    last_hit: String,
}

impl From<&HitCountRecord> for HitCountRow {
    fn from(r: &HitCountRecord) -> Self {
        Self {
            rule: r.rule_label().to_owned(),
            hits: r.hit_count,
            first_hit: r.first_hit_time_stamp.clone().unwrap_or_else(|| "-".into()),
            last_hit: r.last_hit_time_stamp.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

fn report(diags: &Diagnostics) {
    for diag in diags {
        diag.log();
    }
}

/// Resolve the filter flags into a ready `HitCount`.
async fn build<'a>(args: &FilterArgs, client: &'a FmcClient) -> Result<HitCount<'a>, CliError> {
    let mut hc = HitCount::new(client);

    let policy = Identifier::from_parts(
        args.acp_id.clone(),
        args.acp_name.clone(),
        "access control policy",
    )?;
    report(&hc.set_policy(policy).await?);

    if args.device_id.is_some() || args.device_name.is_some() {
        let device =
            Identifier::from_parts(args.device_id.clone(), args.device_name.clone(), "device")?;
        report(&hc.set_device(device).await?);
    }

    let prefilters = args
        .prefilter_ids
        .iter()
        .cloned()
        .map(Identifier::ById)
        .chain(args.prefilter_names.iter().cloned().map(Identifier::ByName));
    for prefilter in prefilters {
        report(&hc.manage_prefilters(PrefilterAction::Add(prefilter)).await?);
    }

    hc.set_fetch_zero_hit_count(args.zero_hits);
    if let Some(limit) = args.limit {
        hc.set_page_limit(Some(limit));
    }

    debug!(criteria = ?hc.criteria(), "hit-count criteria resolved");
    Ok(hc)
}

fn print_planned(planned: &PlannedRequest, global: &GlobalOpts) {
    output::print_output(&format!("{} {}", planned.method, planned.url), global.quiet);
}

pub async fn get(
    args: &FilterArgs,
    client: &FmcClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut hc = build(args, client).await?;

    let (outcome, diagnostics) = hc.get(None).await?;
    report(&diagnostics);

    match outcome {
        Outcome::DryRun(planned) => print_planned(&planned, global),
        Outcome::Sent(page) => {
            let out = output::render_list(
                &global.output,
                &page.items,
                |r| HitCountRow::from(r),
                |r| r.rule.as_ref().map(|rule| rule.id.clone()).unwrap_or_default(),
            );
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}

pub async fn refresh(
    args: &FilterArgs,
    client: &FmcClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let hc = build(args, client).await?;

    match hc.refresh().await? {
        Outcome::DryRun(planned) => print_planned(&planned, global),
        Outcome::Sent(_) => output::print_output("Hit counts refreshed", global.quiet),
    }
    Ok(())
}

pub async fn clear(
    args: &FilterArgs,
    client: &FmcClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let hc = build(args, client).await?;

    if !global.yes && !client.dry_run() {
        return Err(CliError::ConfirmationRequired {
            action: "clear hit counts".into(),
        });
    }

    match hc.clear_counts().await? {
        Outcome::DryRun(planned) => print_planned(&planned, global),
        Outcome::Sent(_) => output::print_output("Hit counts cleared", global.quiet),
    }
    Ok(())
}
