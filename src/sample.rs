//! Sample frames as clocked out in continuous data mode.

/// Channels per frame
pub const CHANNELS: usize = 4;

/// Longest status prefix any supported variant sends
pub const MAX_STATUS_LEN: usize = 3;

/// Longest frame any supported variant sends
pub const MAX_FRAME_LEN: usize = MAX_STATUS_LEN + CHANNELS * 2;

/// Shape of a continuous-mode frame: a status prefix followed by the
/// channels, MSB first. Obtained from [`Variant::frame_layout`](crate::Variant::frame_layout).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameLayout {
    status_len: usize,
}

impl FrameLayout {
    /// `status_len` must not exceed [`MAX_STATUS_LEN`]
    pub(crate) const fn new(status_len: usize) -> Self {
        FrameLayout { status_len }
    }

    pub const fn status_len(&self) -> usize {
        self.status_len
    }

    /// Bytes clocked out for one frame
    pub const fn frame_len(&self) -> usize {
        self.status_len + CHANNELS * 2
    }
}

/// One conversion result, channels in host byte order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SampleFrame {
    status: [u8; MAX_STATUS_LEN],
    status_len: usize,
    pub channels: [u16; CHANNELS],
}

impl SampleFrame {
    /// Decodes the first `layout.frame_len()` bytes of `raw`
    pub fn from_wire(raw: &[u8; MAX_FRAME_LEN], layout: FrameLayout) -> Self {
        let status_len = layout.status_len();
        let mut status = [0u8; MAX_STATUS_LEN];
        status[..status_len].copy_from_slice(&raw[..status_len]);

        let mut channels = [0u16; CHANNELS];
        for (channel, bytes) in channels
            .iter_mut()
            .zip(raw[status_len..layout.frame_len()].chunks_exact(2))
        {
            *channel = u16::from_be_bytes([bytes[0], bytes[1]]);
        }

        SampleFrame {
            status,
            status_len,
            channels,
        }
    }

    /// Status bytes exactly as received; not validated
    pub fn status(&self) -> &[u8] {
        &self.status[..self.status_len]
    }

    pub fn channel(&self, index: usize) -> Option<u16> {
        self.channels.get(index).copied()
    }

    /// Channel value as the signed two's complement code the chip produces
    pub fn channel_code(&self, index: usize) -> Option<i16> {
        self.channel(index).map(|raw| raw as i16)
    }
}
