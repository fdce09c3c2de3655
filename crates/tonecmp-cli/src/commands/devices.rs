//! Audio device listing command.

use clap::Args;
use tonecmp_io::list_input_devices;

#[derive(Args)]
pub struct DevicesArgs {}

pub fn run(_args: DevicesArgs) -> anyhow::Result<()> {
    let devices = list_input_devices()?;

    if devices.is_empty() {
        println!("No input devices found.");
        return Ok(());
    }

    println!("Available Input Devices");
    println!("=======================\n");
    for (idx, device) in devices.iter().enumerate() {
        println!(
            "  [{}] {} ({} Hz)",
            idx, device.name, device.default_sample_rate
        );
    }

    println!();
    println!("Tip: select a device by index or name substring:");
    println!("  tonecmp record out.wav --device 0");
    println!("  tonecmp compare   # with device = \"USB\" in tonecmp.toml");
    Ok(())
}
