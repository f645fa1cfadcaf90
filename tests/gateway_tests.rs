//! Integration tests for the gateway dispatcher

use rs_rfgate::{
    hal::{
        MockEncoderBank, MockHeartbeat, MockLeds, MockReceiver, MockTransmitter, MockUplink,
        ScriptedDecoder,
    },
    Device, Encoding, GatewayDispatcher, HandleOutcome, NormalizedPacket, PacketKind, Payload,
    ProtocolDecoder, RawPacket,
};

type MockGateway = GatewayDispatcher<
    MockReceiver,
    MockTransmitter,
    MockEncoderBank,
    MockLeds,
    MockHeartbeat,
    MockUplink,
>;

fn gateway_with(decoders: Vec<Box<dyn ProtocolDecoder>>) -> MockGateway {
    GatewayDispatcher::new(
        MockReceiver::new(),
        MockTransmitter::new(),
        MockEncoderBank::new(),
        decoders,
        MockLeds::new(),
        MockHeartbeat::new(),
        MockUplink::new(),
    )
}

/// The reference probe bank: six protocols in their stock order.
fn stock_bank(matching: &[Encoding]) -> Vec<Box<dyn ProtocolDecoder>> {
    [
        Encoding::Common,
        Encoding::Wt450,
        Encoding::Arlec,
        Encoding::He330v2,
        Encoding::Osv2,
        Encoding::Bind,
    ]
    .into_iter()
    .map(|encoding| {
        let decoder = if matching.contains(&encoding) {
            ScriptedDecoder::matching(encoding)
        } else {
            ScriptedDecoder::rejecting(encoding)
        };
        Box::new(decoder) as Box<dyn ProtocolDecoder>
    })
    .collect()
}

#[test]
fn setup_initializes_transmitter_then_receiver() {
    let mut gateway = gateway_with(Vec::new());
    gateway.setup().unwrap();

    assert!(gateway.transmitter().setup_done);
    assert!(gateway.receiver().running);
}

#[test]
fn last_matching_decoder_fills_the_report() {
    // WT450 (index 1) and HE330v2 (index 3) both match; the later,
    // more specific interpretation must win.
    let decoders: Vec<Box<dyn ProtocolDecoder>> = vec![
        Box::new(ScriptedDecoder::rejecting(Encoding::Common)),
        Box::new(
            ScriptedDecoder::matching(Encoding::Wt450).with_payload(Payload::Value(111)),
        ),
        Box::new(ScriptedDecoder::rejecting(Encoding::Arlec)),
        Box::new(
            ScriptedDecoder::matching(Encoding::He330v2).with_payload(Payload::Value(222)),
        ),
        Box::new(ScriptedDecoder::rejecting(Encoding::Osv2)),
        Box::new(ScriptedDecoder::rejecting(Encoding::Bind)),
    ];

    let mut gateway = gateway_with(decoders);
    gateway
        .receiver_mut()
        .load(RawPacket::from_pulses(&[500, 1000, 500, 1000]));

    let outcome = gateway.check().unwrap();
    assert_eq!(outcome.decoded, Some(Encoding::He330v2));

    let sent = &gateway.uplink().sent;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, PacketKind::DeviceReport);
    assert_eq!(sent[0].encoding, Some(Encoding::He330v2));
    assert_eq!(sent[0].payload, Payload::Value(222));

    // Exactly one activity blink, not one per match
    assert_eq!(gateway.leds().blink_count, 1);
}

#[test]
fn every_probe_starts_at_the_cursor_origin() {
    let first = ScriptedDecoder::rejecting(Encoding::Common).with_consume(3);
    let second = ScriptedDecoder::matching(Encoding::Wt450).with_consume(7);
    let third = ScriptedDecoder::rejecting(Encoding::Arlec).with_consume(1);
    let logs = [first.probe_log(), second.probe_log(), third.probe_log()];

    let mut gateway = gateway_with(vec![
        Box::new(first),
        Box::new(second),
        Box::new(third),
    ]);
    gateway
        .receiver_mut()
        .load(RawPacket::from_pulses(&[1, 2, 3, 4, 5, 6, 7, 8]));
    gateway.check().unwrap();

    // Each decoder probed once, from pulse zero, no matter how much the
    // previous probe consumed or whether it matched.
    for log in &logs {
        assert_eq!(*log.borrow(), vec![0]);
    }
}

#[test]
fn buffer_is_purged_after_a_decoded_frame() {
    let mut gateway = gateway_with(stock_bank(&[Encoding::Osv2]));
    gateway.receiver_mut().load(RawPacket::from_pulses(&[1, 2]));

    gateway.check().unwrap();
    assert!(gateway.receiver().buffer.is_none());
    assert_eq!(gateway.receiver().purge_calls, 1);
}

#[test]
fn unmatched_frame_is_dropped_silently() {
    let mut gateway = gateway_with(stock_bank(&[]));
    gateway.receiver_mut().load(RawPacket::from_pulses(&[1, 2]));

    let outcome = gateway.check().unwrap();
    assert_eq!(outcome.decoded, None);
    assert!(gateway.uplink().sent.is_empty());
    assert_eq!(gateway.leds().blink_count, 0);

    // Still purged, or the one-slot receiver would stall
    assert!(gateway.receiver().buffer.is_none());
    assert_eq!(gateway.receiver().purge_calls, 1);
}

#[test]
fn empty_tick_does_nothing() {
    let mut gateway = gateway_with(stock_bank(&[Encoding::Common]));
    let outcome = gateway.check().unwrap();

    assert_eq!(outcome, Default::default());
    assert!(gateway.uplink().sent.is_empty());
    assert_eq!(gateway.receiver().purge_calls, 0);
}

#[test]
fn heartbeat_reports_status_then_eyes() {
    let mut gateway = GatewayDispatcher::new(
        MockReceiver::new(),
        MockTransmitter::new(),
        MockEncoderBank::new(),
        Vec::new(),
        MockLeds::with_colors(0x00FF00, 0x0000FF),
        MockHeartbeat::new(),
        MockUplink::new(),
    );

    gateway.heartbeat_mut().expire();
    let outcome = gateway.check().unwrap();
    assert!(outcome.heartbeat_reported);

    let sent = &gateway.uplink().sent;
    assert_eq!(sent.len(), 2);

    assert_eq!(sent[0].kind, PacketKind::DeviceReport);
    assert_eq!(sent[0].guid, 0);
    assert_eq!(sent[0].device, Device::StatusLed);
    assert_eq!(sent[0].payload, Payload::Value(0x00FF00));

    assert_eq!(sent[1].kind, PacketKind::DeviceReport);
    assert_eq!(sent[1].guid, 0);
    assert_eq!(sent[1].device, Device::EyesLed);
    assert_eq!(sent[1].payload, Payload::Value(0x0000FF));
}

#[test]
fn heartbeat_fires_once_per_expiry() {
    let mut gateway = gateway_with(Vec::new());

    gateway.heartbeat_mut().expire();
    gateway.check().unwrap();
    assert_eq!(gateway.uplink().sent.len(), 2);

    // Next tick: heartbeat consumed, nothing new
    let outcome = gateway.check().unwrap();
    assert!(!outcome.heartbeat_reported);
    assert_eq!(gateway.uplink().sent.len(), 2);
}

#[test]
fn inbound_frame_is_processed_before_heartbeat() {
    let mut gateway = gateway_with(stock_bank(&[Encoding::Wt450]));
    gateway.receiver_mut().load(RawPacket::from_pulses(&[1, 2]));
    gateway.heartbeat_mut().expire();

    let outcome = gateway.check().unwrap();
    assert_eq!(outcome.decoded, Some(Encoding::Wt450));
    assert!(outcome.heartbeat_reported);

    let sent = &gateway.uplink().sent;
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[0].device, Device::OnboardRf); // decoded report first
    assert_eq!(sent[1].device, Device::StatusLed);
    assert_eq!(sent[2].device, Device::EyesLed);
}

#[test]
fn remote_guid_is_ignored_entirely() {
    let mut gateway = gateway_with(Vec::new());

    let cmd = NormalizedPacket::device_command(Device::StatusLed, Payload::Value(0xFF0000))
        .with_guid(7);
    let outcome = gateway.handle(&cmd).unwrap();

    assert_eq!(outcome, HandleOutcome::Ignored);
    assert_eq!(gateway.leds().stat, 0); // untouched
    assert!(gateway.uplink().sent.is_empty()); // not even an ack
}

#[test]
fn status_led_command_sets_color_and_acks() {
    let mut gateway = gateway_with(Vec::new());

    let cmd = NormalizedPacket::device_command(Device::StatusLed, Payload::Value(0x00FF00));
    let outcome = gateway.handle(&cmd).unwrap();
    assert_eq!(outcome, HandleOutcome::LedUpdated(Device::StatusLed));

    assert_eq!(gateway.leds().stat, 0x00FF00);
    assert!(gateway.transmitter().sends.is_empty()); // RF path untouched
    assert_eq!(gateway.receiver().stop_calls, 0);

    // Ack mirrors the command, kind flipped
    let sent = &gateway.uplink().sent;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, PacketKind::Ack);
    assert_eq!(sent[0].guid, cmd.guid);
    assert_eq!(sent[0].device, cmd.device);
    assert_eq!(sent[0].payload, cmd.payload);
}

#[test]
fn eyes_led_command_sets_color() {
    let mut gateway = gateway_with(Vec::new());

    let cmd = NormalizedPacket::device_command(Device::EyesLed, Payload::Value(0x123456));
    let outcome = gateway.handle(&cmd).unwrap();

    assert_eq!(outcome, HandleOutcome::LedUpdated(Device::EyesLed));
    assert_eq!(gateway.leds().eyes, 0x123456);
    assert_eq!(gateway.leds().stat, 0);
}

#[test]
fn rf_command_encodes_transmits_and_acks() {
    let mut gateway = gateway_with(Vec::new());
    gateway.setup().unwrap();

    let cmd = NormalizedPacket::rf_command(Encoding::Arlec, 320, Payload::Bytes(vec![0x3, 0x7]));
    let outcome = gateway.handle(&cmd).unwrap();
    assert_eq!(outcome, HandleOutcome::Transmitted(Encoding::Arlec));

    // The mock encoder's deterministic layout proves the bank built an
    // Arlec encoder with timing 320 and that the byte path fed it.
    let sends = &gateway.transmitter().sends;
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].0.pulses(), &[9002, 320, 3, 7]);
    assert_eq!(sends[0].1, 5); // stock repeat count

    // Receiver bracketed the transmission: stopped once, restarted
    let receiver = gateway.receiver();
    assert_eq!(receiver.stop_calls, 1);
    assert_eq!(receiver.start_calls, 2); // setup + restart
    assert!(receiver.running);

    // Ack follows the side effect
    let sent = &gateway.uplink().sent;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, PacketKind::Ack);
    assert_eq!(sent[0].device, Device::OnboardRf);
    assert_eq!(sent[0].encoding, Some(Encoding::Arlec));
}

#[test]
fn rf_command_scalar_payload_uses_scalar_path() {
    let mut gateway = gateway_with(Vec::new());

    let cmd = NormalizedPacket::rf_command(Encoding::Common, 350, Payload::Value(0x00BEEF));
    gateway.handle(&cmd).unwrap();

    let sends = &gateway.transmitter().sends;
    assert_eq!(sends[0].0.pulses(), &[9000, 350, 0x0000, 0xBEEF]);
}

#[test]
fn unknown_device_is_a_noop_but_still_acked() {
    let mut gateway = gateway_with(Vec::new());

    let cmd = NormalizedPacket::device_command(Device::Unknown(77), Payload::Value(9));
    let outcome = gateway.handle(&cmd).unwrap();
    assert_eq!(outcome, HandleOutcome::UnknownDevice(77));

    assert_eq!(gateway.leds().stat, 0);
    assert_eq!(gateway.leds().eyes, 0);
    assert!(gateway.transmitter().sends.is_empty());

    let sent = &gateway.uplink().sent;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, PacketKind::Ack);
    assert_eq!(sent[0].device, Device::Unknown(77));
}

#[test]
fn consecutive_frames_decode_independently() {
    let mut gateway = gateway_with(stock_bank(&[Encoding::Bind]));

    gateway.receiver_mut().load(RawPacket::from_pulses(&[1, 2]));
    gateway.check().unwrap();

    gateway.receiver_mut().load(RawPacket::from_pulses(&[3, 4]));
    gateway.check().unwrap();

    assert_eq!(gateway.uplink().sent.len(), 2);
    assert_eq!(gateway.receiver().purge_calls, 2);
    assert_eq!(gateway.leds().blink_count, 2);
}
