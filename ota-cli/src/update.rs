//! `ota-update`: the device downloads and flashes firmware from a URL.

use ota_client::{Accepted, OTA_PATH, Result, Timeouts, URL_CAPACITY};

use crate::{
    cli::UpdateOpt,
    report::{Action, BULB, GLOBE, HOURGLASS, INBOX, LINK, OUTBOX, REPEAT, Reporter, SPARKLES},
};

pub async fn run(opt: &UpdateOpt, reporter: &Reporter) -> Result<Accepted> {
    reporter.banner("OTA Update from URL");

    let res = trigger(opt, reporter).await;

    match &res {
        Ok(_) => {
            reporter.blank();
            reporter.line(format!("{SPARKLES}OTA update initiated!"));
            reporter.line(format!("{BULB}Tips:"));
            reporter.line("   - Watch the serial monitor for real-time logs");
            reporter.line("   - Update takes 30-60 seconds typically");
            reporter.line("   - The device reboots automatically when done");
        }
        Err(e) => reporter.failure(Action::Trigger, e),
    }

    res
}

async fn trigger(opt: &UpdateOpt, reporter: &Reporter) -> Result<Accepted> {
    let timeouts = match opt.common.timeout {
        Some(t) => Timeouts::default().update_trigger(t),
        None => Timeouts::default(),
    };
    let client = crate::client(&opt.device_ip, &opt.common, timeouts)?;

    crate::check_version(&client, reporter, "").await;

    reporter.line(format!("{GLOBE}Target device: {}", client.device()));
    reporter.line(format!("{INBOX}Firmware URL: {}", opt.firmware_url));
    reporter.line(format!("{LINK}OTA endpoint: {}", client.device().url(OTA_PATH)));

    if opt.firmware_url.len() > URL_CAPACITY {
        reporter.warn(format!(
            "Firmware URL is longer than {URL_CAPACITY} bytes, the device may reject it"
        ));
    }

    reporter.line(format!("{OUTBOX}Sending OTA update request..."));
    let accepted = client.trigger_url_update(&opt.firmware_url).await?;

    reporter.success("OTA update request sent successfully!");
    if let Some(msg) = accepted.message() {
        reporter.line(format!("   Device says: {msg}"));
    }
    reporter.line(format!("{REPEAT}Device is downloading and installing firmware..."));
    reporter.line(format!(
        "{HOURGLASS}This may take 30-60 seconds depending on connection speed"
    ));

    Ok(accepted)
}
