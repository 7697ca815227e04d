// ABOUTME: Comprehensive benchmark suite for SMPP library performance testing
// ABOUTME: Measures frame parsing, serialization, and memory allocation patterns

use bytes::BytesMut;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use smpp_esme::codec::{Encodable, Frame, PduRegistry};
use smpp_esme::datatypes::*;
use std::io::Cursor;
use std::time::Duration;

fn create_sample_submit_sm() -> SubmitSm {
    SubmitSm::new(
        1,
        ServiceType::default(),
        TypeOfNumber::Unknown,
        NumericPlanIndicator::Unknown,
        SourceAddr::new("12345", TypeOfNumber::Unknown).unwrap(),
        TypeOfNumber::Unknown,
        NumericPlanIndicator::Unknown,
        DestinationAddr::new("67890", TypeOfNumber::Unknown).unwrap(),
        EsmClass::default(),
        0,
        DataCoding::SmscDefault,
        ShortMessage::from("Hello World"),
    )
    .unwrap()
}

fn create_sample_bind_transmitter() -> BindTransmitter {
    BindTransmitter {
        command_status: CommandStatus::Ok,
        sequence_number: 1,
        system_id: SystemId::from("test_system"),
        password: Some(Password::from("password")),
        system_type: SystemType::from(""),
        interface_version: InterfaceVersion::SmppV34,
        addr_ton: TypeOfNumber::Unknown,
        addr_npi: NumericPlanIndicator::Unknown,
        address_range: AddressRange::from(""),
    }
}

fn create_sample_enquire_link() -> EnquireLink {
    EnquireLink::new(1)
}

fn create_sample_deliver_sm() -> DeliverSm {
    DeliverSm::builder()
        .sequence_number(1)
        .source_addr("12345")
        .destination_addr("67890")
        .short_message("Hello World")
        .build()
        .unwrap()
}

fn frame_bytes(frame: &Frame) -> Vec<u8> {
    let bytes = match frame {
        Frame::SubmitSm(pdu) => pdu.to_bytes(),
        Frame::DeliverSm(pdu) => pdu.to_bytes(),
        Frame::BindTransmitter(pdu) => pdu.to_bytes(),
        Frame::EnquireLink(pdu) => pdu.to_bytes(),
        other => panic!("benchmark helper does not cover {other:?}"),
    };
    bytes.to_vec()
}

fn bench_frame_check(c: &mut Criterion) {
    let submit_bytes = frame_bytes(&Frame::SubmitSm(Box::new(create_sample_submit_sm())));
    let enquire_bytes = frame_bytes(&Frame::EnquireLink(create_sample_enquire_link()));

    let mut group = c.benchmark_group("frame_check");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("submit_sm", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(submit_bytes.as_slice()));
            Frame::check(&mut cursor)
        })
    });

    group.bench_function("enquire_link", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(enquire_bytes.as_slice()));
            Frame::check(&mut cursor)
        })
    });

    group.finish();
}

fn bench_frame_parse(c: &mut Criterion) {
    let registry = PduRegistry::new();
    let mut group = c.benchmark_group("frame_parse");
    group.measurement_time(Duration::from_secs(10));

    let submit_bytes = frame_bytes(&Frame::SubmitSm(Box::new(create_sample_submit_sm())));
    group.bench_function("submit_sm", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(submit_bytes.as_slice()));
            Frame::parse(&registry, &mut cursor).unwrap()
        })
    });

    let deliver_bytes = frame_bytes(&Frame::DeliverSm(Box::new(create_sample_deliver_sm())));
    group.bench_function("deliver_sm", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(deliver_bytes.as_slice()));
            Frame::parse(&registry, &mut cursor).unwrap()
        })
    });

    let bind_bytes = frame_bytes(&Frame::BindTransmitter(create_sample_bind_transmitter()));
    group.bench_function("bind_transmitter", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(bind_bytes.as_slice()));
            Frame::parse(&registry, &mut cursor).unwrap()
        })
    });

    let enquire_bytes = frame_bytes(&Frame::EnquireLink(create_sample_enquire_link()));
    group.bench_function("enquire_link", |b| {
        b.iter(|| {
            let mut cursor = Cursor::new(black_box(enquire_bytes.as_slice()));
            Frame::parse(&registry, &mut cursor).unwrap()
        })
    });

    group.finish();
}

fn bench_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialization");
    group.measurement_time(Duration::from_secs(10));

    let submit_sm = create_sample_submit_sm();
    group.bench_function("submit_sm", |b| b.iter(|| black_box(&submit_sm).to_bytes()));

    let deliver_sm = create_sample_deliver_sm();
    group.bench_function("deliver_sm", |b| {
        b.iter(|| black_box(&deliver_sm).to_bytes())
    });

    let bind_tx = create_sample_bind_transmitter();
    group.bench_function("bind_transmitter", |b| {
        b.iter(|| black_box(&bind_tx).to_bytes())
    });

    let enquire_link = create_sample_enquire_link();
    group.bench_function("enquire_link", |b| {
        b.iter(|| black_box(&enquire_link).to_bytes())
    });

    group.finish();
}

fn bench_roundtrip(c: &mut Criterion) {
    let registry = PduRegistry::new();
    let mut group = c.benchmark_group("roundtrip");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("submit_sm", |b| {
        b.iter(|| {
            let submit_sm = create_sample_submit_sm();
            let bytes = submit_sm.to_bytes().to_vec();
            let mut cursor = Cursor::new(black_box(bytes.as_slice()));
            Frame::parse(&registry, &mut cursor).unwrap()
        })
    });

    group.bench_function("enquire_link", |b| {
        b.iter(|| {
            let enquire_link = create_sample_enquire_link();
            let bytes = enquire_link.to_bytes().to_vec();
            let mut cursor = Cursor::new(black_box(bytes.as_slice()));
            Frame::parse(&registry, &mut cursor).unwrap()
        })
    });

    group.finish();
}

fn bench_message_sizes(c: &mut Criterion) {
    let registry = PduRegistry::new();
    let mut group = c.benchmark_group("message_sizes");
    group.measurement_time(Duration::from_secs(10));

    let message_sizes = [10, 50, 100, 160, 254]; // Common SMS message sizes

    for &size in &message_sizes {
        let message = "A".repeat(size);
        let mut submit_sm = create_sample_submit_sm();
        submit_sm.short_message = ShortMessage::from(message.as_str());
        submit_sm.sm_length = size as u8;

        let bytes = submit_sm.to_bytes().to_vec();

        group.bench_with_input(BenchmarkId::new("submit_sm_parse", size), &bytes, |b, bytes| {
            b.iter(|| {
                let mut cursor = Cursor::new(black_box(bytes.as_slice()));
                Frame::parse(&registry, &mut cursor).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_memory_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("memory_allocation");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("bytesmut_allocation", |b| {
        b.iter(|| {
            let mut buf = BytesMut::new();
            buf.extend_from_slice(black_box(b"Hello World"));
            buf
        })
    });

    group.bench_function("string_allocation", |b| {
        b.iter(|| black_box("test_system".to_string()))
    });

    group.bench_function("vec_allocation", |b| {
        b.iter(|| black_box("Hello World".as_bytes().to_vec()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_frame_check,
    bench_frame_parse,
    bench_serialization,
    bench_roundtrip,
    bench_message_sizes,
    bench_memory_allocation
);
criterion_main!(benches);
