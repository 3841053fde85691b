// crates/ndtp-core/tests/data_framing.rs

use ndtp_core::{
    BroadbandChannel, ElectricalBroadbandData, NdtpError, NdtpMessage, SpiketrainData,
};

#[test]
fn broadband_window_packs_one_message_per_channel() {
    let window = ElectricalBroadbandData {
        t0: 1_700_000_000_000_000_000,
        bit_width: 16,
        is_signed: true,
        sample_rate: 30_000,
        channels: vec![
            BroadbandChannel { channel_id: 0, samples: vec![-100, 0, 100] },
            BroadbandChannel { channel_id: 1, samples: vec![7] },
            BroadbandChannel { channel_id: 2, samples: vec![-32768, 32767] },
        ],
    };

    let frames = window.pack(10).unwrap();
    assert_eq!(frames.len(), 3);

    for (i, frame) in frames.iter().enumerate() {
        let msg = NdtpMessage::unpack(frame).unwrap();
        assert_eq!(msg.header.timestamp, window.t0);
        assert_eq!(msg.header.seq_number, 10 + i as u16);

        let decoded = ElectricalBroadbandData::unpack(frame).unwrap();
        assert_eq!(decoded.channels, vec![window.channels[i].clone()]);
        assert_eq!(decoded.bit_width, window.bit_width);
        assert_eq!(decoded.sample_rate, window.sample_rate);
    }
}

#[test]
fn broadband_window_sequence_numbers_wrap() {
    let window = ElectricalBroadbandData {
        t0: 1,
        bit_width: 8,
        is_signed: false,
        sample_rate: 1_000,
        channels: vec![
            BroadbandChannel { channel_id: 0, samples: vec![1] },
            BroadbandChannel { channel_id: 1, samples: vec![2] },
            BroadbandChannel { channel_id: 2, samples: vec![3] },
        ],
    };

    let frames = window.pack(u16::MAX - 1).unwrap();
    let seqs: Vec<u16> = frames
        .iter()
        .map(|f| NdtpMessage::unpack(f).unwrap().header.seq_number)
        .collect();
    assert_eq!(seqs, vec![u16::MAX - 1, u16::MAX, 0]);
}

#[test]
fn spiketrain_window_roundtrip() {
    let window = SpiketrainData {
        t0: 555,
        bin_size_ms: 20,
        spike_counts: vec![0, 1, 2, 3, 4],
    };

    let frames = window.pack(77).unwrap();
    assert_eq!(frames.len(), 1);

    let decoded = SpiketrainData::unpack(&frames[0]).unwrap();
    assert_eq!(decoded, window);
}

#[test]
fn window_unpack_rejects_wrong_payload_kind() {
    let spikes = SpiketrainData {
        t0: 1,
        bin_size_ms: 10,
        spike_counts: vec![1, 2],
    };
    let frames = spikes.pack(0).unwrap();
    assert!(matches!(
        ElectricalBroadbandData::unpack(&frames[0]),
        Err(NdtpError::UnknownDataType(_))
    ));

    let broadband = ElectricalBroadbandData {
        t0: 1,
        bit_width: 8,
        is_signed: false,
        sample_rate: 100,
        channels: vec![BroadbandChannel { channel_id: 0, samples: vec![1] }],
    };
    let frames = broadband.pack(0).unwrap();
    assert!(matches!(
        SpiketrainData::unpack(&frames[0]),
        Err(NdtpError::UnknownDataType(_))
    ));
}
