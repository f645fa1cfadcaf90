//! Desktop demo: the full gateway loop against mock radio hardware.
//!
//! Scripts a handful of received pulse trains and inbound host commands
//! through the dispatcher, with the uplink printing JSON frames to stdout
//! the way a real deployment would write them to a serial port.
//!
//! # Usage
//!
//! ```sh
//! cargo run --example serial_gateway
//! RUST_LOG=debug cargo run --example serial_gateway
//! ```

use anyhow::Result;

use rs_rfgate::hal::{
    IntervalHeartbeat, JsonUplink, MockClock, MockEncoderBank, MockLeds, MockReceiver,
    MockTransmitter, ScriptedDecoder,
};
use rs_rfgate::{
    Device, Encoding, GatewayConfig, GatewayDispatcher, NormalizedPacket, Payload, RawPacket,
};

fn main() -> Result<()> {
    env_logger::init();

    println!("=================================");
    println!("  rs-rfgate Serial Gateway Demo");
    println!("=================================");
    println!();

    let config = GatewayConfig::default()
        .with_device_name("demo-gateway")
        .with_heartbeat_ms(2_000);

    // Decoder bank in probe order: looser protocols first, specific last.
    let decoders: Vec<Box<dyn rs_rfgate::ProtocolDecoder>> = vec![
        Box::new(ScriptedDecoder::rejecting(Encoding::Common)),
        Box::new(
            ScriptedDecoder::matching(Encoding::Wt450)
                .with_payload(Payload::Bytes(vec![21, 60])), // 21C, 60% RH
        ),
        Box::new(ScriptedDecoder::rejecting(Encoding::Arlec)),
        Box::new(ScriptedDecoder::rejecting(Encoding::He330v2)),
        Box::new(ScriptedDecoder::rejecting(Encoding::Osv2)),
        Box::new(ScriptedDecoder::rejecting(Encoding::Bind)),
    ];

    let heartbeat_ms = u64::from(config.heartbeat_ms);
    let mut gateway = GatewayDispatcher::new(
        MockReceiver::new(),
        MockTransmitter::new(),
        MockEncoderBank::new(),
        decoders,
        MockLeds::with_colors(0x00FF00, 0x0000FF),
        IntervalHeartbeat::new(MockClock::new(), heartbeat_ms),
        JsonUplink::new(std::io::stdout()),
    )
    .with_config(config);

    gateway.setup()?;

    // A weather-station frame arrives off the air.
    println!("-- frame received, probing decoders:");
    gateway
        .receiver_mut()
        .load(RawPacket::from_pulses(&[500, 1000, 500, 2000, 500, 1000]));
    gateway.check()?;

    // The host turns the eyes purple.
    println!("-- host command: eyes LED purple:");
    let cmd = NormalizedPacket::device_command(Device::EyesLed, Payload::Value(0x800080));
    gateway.handle(&cmd)?;

    // The host switches an Arlec outlet on.
    println!("-- host command: Arlec outlet on:");
    let cmd = NormalizedPacket::rf_command(Encoding::Arlec, 320, Payload::Bytes(vec![0x3, 0x7]));
    gateway.handle(&cmd)?;
    let (ref sent, repeats) = gateway.transmitter().sends[0];
    println!("   transmitted {} pulses x{repeats}", sent.len());

    // A WT450 command would have nothing to encode with.
    println!("-- host command: WT450 (receive-only, must fail):");
    let cmd = NormalizedPacket::rf_command(Encoding::Wt450, 0, Payload::Value(1));
    match gateway.handle(&cmd) {
        Err(e) => println!("   rejected as expected: {e}"),
        Ok(outcome) => println!("   unexpected success: {outcome:?}"),
    }

    // Let the heartbeat expire and report status.
    println!("-- advancing clock past the heartbeat interval:");
    gateway
        .heartbeat_mut()
        .clock_mut()
        .advance(heartbeat_ms + 1);
    gateway.check()?;

    println!();
    println!("Done.");
    Ok(())
}
