use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

/// Number of samples kept for the trend charts.
pub const HISTORY_SIZE: usize = 90;

/// One sliding window of global per-tick totals (one per direction).
pub type HistoryBuffer = RingBuffer<HISTORY_SIZE>;

/// Fixed-capacity sample window. Grows from empty to `N`, then evicts the
/// oldest sample on every push.
#[derive(Clone, Debug)]
pub struct RingBuffer<const N: usize> {
    data: [u64; N],
    head: usize,
    count: usize,
}

impl<const N: usize> RingBuffer<N> {
    pub const fn new() -> Self {
        Self {
            data: [0; N],
            head: 0,
            count: 0,
        }
    }

    pub fn push(&mut self, value: u64) {
        self.data[self.head] = value;
        self.head = (self.head + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    pub fn latest(&self) -> Option<u64> {
        if self.count == 0 {
            return None;
        }
        let idx = if self.head == 0 { N - 1 } else { self.head - 1 };
        Some(self.data[idx])
    }

    /// Largest sample currently in the window; 0 when empty.
    pub fn peak(&self) -> u64 {
        self.iter().max().unwrap_or(0)
    }

    /// Iterate from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        let start = (self.head + N - self.count) % N;
        (0..self.count).map(move |i| self.data[(start + i) % N])
    }

    pub fn to_vec(&self) -> Vec<u64> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for RingBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Serialize for RingBuffer<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.count))?;
        for val in self.iter() {
            seq.serialize_element(&val)?;
        }
        seq.end()
    }
}
