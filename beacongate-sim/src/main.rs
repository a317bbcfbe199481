//! Run the beacon gateway duty cycle against simulated hardware

use beacongate_core::{
    control::{ControlReply, ControlRequest},
    BeaconAddr, CycleState, DutyCycle, ReportPublisher, SchedulerConfig,
};
use beacongate_sim::{SimBeacon, SimPower, SimRadio, SimUplink};

const CYCLES: usize = 5;

/// Sleep/delay divisor so a 12 s cycle takes ~120 ms on the desktop
const TIME_SCALE: u32 = 100;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let beacons = vec![
        SimBeacon::new(BeaconAddr([0xAA, 0x00, 0x00, 0x00, 0x00, 0x01]), 120),
        SimBeacon::new(BeaconAddr([0xAA, 0x00, 0x00, 0x00, 0x00, 0x02]), 480),
        SimBeacon::new(BeaconAddr([0xAA, 0x00, 0x00, 0x00, 0x00, 0x03]), 35),
    ];

    let mut gateway = DutyCycle::new(
        SchedulerConfig::default(),
        SimRadio::new(beacons, 0xB1E5_EED5),
        SimUplink::new(1),
        SimPower::new(TIME_SCALE),
        ReportPublisher::airq(),
    );

    let mut completed = 0;
    while completed < CYCLES {
        let was_sleeping = gateway.state() == CycleState::Sleeping;
        gateway.step();
        if was_sleeping {
            completed += 1;
            log::info!("cycle {completed}/{CYCLES} complete");
        }
    }

    let max = read_value(&mut gateway, ControlRequest::ReadMaxValue);
    let min = read_value(&mut gateway, ControlRequest::ReadMinValue);
    log::info!("session extrema: max={max} min={min}");
}

fn read_value(
    gateway: &mut DutyCycle<u32, SimRadio, SimUplink, SimPower>,
    request: ControlRequest,
) -> f64 {
    match gateway.handle_control(request) {
        ControlReply::Value(value) => value,
        ControlReply::Ack => 0.0,
    }
}
