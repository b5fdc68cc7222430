//! `ota-upload`: push a local firmware binary to the device.

use std::time::Duration;

use ota_client::{Accepted, Firmware, Result, SOFT_SIZE_LIMIT, Timeouts, UPLOAD_PATH};

use crate::{
    cli::UploadOpt,
    report::{Action, GLOBE, OUTBOX, PACKAGE, REPEAT, RULER, Reporter, SPARKLES},
};

pub async fn run(opt: &UploadOpt, reporter: &Reporter) -> Result<Accepted> {
    reporter.banner("OTA Firmware Upload");

    let res = upload(opt, reporter).await;

    match &res {
        Ok(_) => {
            reporter.blank();
            reporter.line(format!("{SPARKLES}Done! Check the serial monitor for boot messages."));
        }
        Err(e) => reporter.failure(Action::Upload, e),
    }

    res
}

async fn upload(opt: &UploadOpt, reporter: &Reporter) -> Result<Accepted> {
    // The file is checked before anything goes over the network
    let firmware = Firmware::from_path(&opt.firmware_path).await?;

    reporter.line(format!("{PACKAGE}Firmware file: {}", firmware.path().display()));
    reporter.line(format!(
        "{RULER}File size: {} bytes ({:.2} MB)",
        group_digits(firmware.len()),
        firmware.size_mib()
    ));
    if firmware.exceeds_soft_limit() {
        reporter.warn(format!(
            "Firmware is larger than {}MB, may not fit in OTA partition",
            SOFT_SIZE_LIMIT / (1024 * 1024)
        ));
    }
    reporter.blank();

    let timeouts = match opt.common.timeout {
        Some(t) => Timeouts::default().update_upload(t),
        None => Timeouts::default(),
    };
    let client = crate::client(&opt.device_ip, &opt.common, timeouts)?;

    crate::check_version(&client, reporter, " (device may be running old firmware)").await;

    reporter.line(format!("{GLOBE}Target: {}", client.device().url(UPLOAD_PATH)));
    reporter.line(format!("{OUTBOX}Uploading firmware..."));

    let spinner = if reporter.is_quiet() {
        indicatif::ProgressBar::hidden()
    } else {
        indicatif::ProgressBar::new_spinner()
    };
    spinner.set_style(
        indicatif::ProgressStyle::with_template("   {spinner:.green} {msg} [{elapsed_precise}]")
            .expect("Failed to create progress bar"),
    );
    spinner.set_message(format!("Sending {} bytes", group_digits(firmware.len())));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let res = client.send(firmware.into()).await;
    spinner.finish_and_clear();
    let accepted = res?;

    reporter.success("OTA update successful!");
    if let Some(msg) = accepted.message() {
        reporter.line(format!("   Device says: {msg}"));
    }
    reporter.line(format!("{REPEAT}Device will reboot in a few seconds..."));

    Ok(accepted)
}

/// `1234567` -> `1,234,567`
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}
