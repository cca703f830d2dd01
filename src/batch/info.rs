//! Per-member status codes of a batched call

/// Decoded status of one batch member
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemberStatus {
    /// Factorized (or not yet failed)
    Success,
    /// The leading `minor × minor` block is not positive-definite.
    ///
    /// `minor` is 1-based and already includes the global step offset.
    NotPositiveDefinite {
        /// 1-based index of the failing leading minor
        minor: usize,
    },
    /// Argument `-code` of the member was invalid
    InvalidArgument {
        /// The raw negative code
        code: i32,
    },
}

impl MemberStatus {
    /// Decode a LAPACK-style info code
    #[inline]
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => MemberStatus::Success,
            c if c > 0 => MemberStatus::NotPositiveDefinite { minor: c as usize },
            c => MemberStatus::InvalidArgument { code: c },
        }
    }
}

/// One info code per batch member
///
/// `0` means success, a positive `k` means the leading `k × k` minor of that
/// member was not positive-definite, a negative value flags an invalid
/// argument. The first non-zero code written for a member wins: batched
/// kernels treat any member with a non-zero entry as failed and never touch
/// it (or its entry) again.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InfoArray {
    codes: Vec<i32>,
}

impl InfoArray {
    /// Info array for `batch_count` members, all successful
    pub fn new(batch_count: usize) -> Self {
        Self {
            codes: vec![0; batch_count],
        }
    }

    /// Wrap existing codes (for example carried over from an earlier stage)
    pub fn from_codes(codes: Vec<i32>) -> Self {
        Self { codes }
    }

    /// Number of members
    #[inline]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the array has no members
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Raw code of member `index`
    #[inline]
    pub fn code(&self, index: usize) -> i32 {
        self.codes[index]
    }

    /// Decoded status of member `index`
    pub fn status(&self, index: usize) -> MemberStatus {
        MemberStatus::from_code(self.codes[index])
    }

    /// Whether member `index` is still eligible for work
    #[inline]
    pub fn is_live(&self, index: usize) -> bool {
        self.codes[index] == 0
    }

    /// Whether every member succeeded
    pub fn all_succeeded(&self) -> bool {
        self.codes.iter().all(|&c| c == 0)
    }

    /// Iterator over `(index, code)` of failed members
    pub fn failures(&self) -> impl Iterator<Item = (usize, i32)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != 0)
            .map(|(i, c)| (i, *c))
    }

    /// Record a failure for member `index` unless one is already recorded.
    ///
    /// Returns whether `code` was stored.
    pub fn record(&mut self, index: usize, code: i32) -> bool {
        record_failure(&mut self.codes[index], code)
    }

    /// Mark every member as successful again
    pub fn reset(&mut self) {
        self.codes.fill(0);
    }

    /// Raw codes
    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.codes
    }

    /// Raw codes, for batch dispatch
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [i32] {
        &mut self.codes
    }

    /// Consume into raw codes
    pub fn into_vec(self) -> Vec<i32> {
        self.codes
    }
}

/// First-failure-wins update of a single member's code.
#[inline]
pub(crate) fn record_failure(status: &mut i32, code: i32) -> bool {
    if *status == 0 && code != 0 {
        *status = code;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failure_wins() {
        let mut info = InfoArray::new(3);
        assert!(info.all_succeeded());

        assert!(info.record(1, 4));
        assert!(!info.record(1, 2));
        assert_eq!(info.code(1), 4);
        assert!(!info.is_live(1));
        assert!(info.is_live(0));

        let failures: Vec<_> = info.failures().collect();
        assert_eq!(failures, vec![(1, 4)]);
    }

    #[test]
    fn test_status_decoding() {
        let info = InfoArray::from_codes(vec![0, 3, -2]);
        assert_eq!(info.status(0), MemberStatus::Success);
        assert_eq!(info.status(1), MemberStatus::NotPositiveDefinite { minor: 3 });
        assert_eq!(info.status(2), MemberStatus::InvalidArgument { code: -2 });
    }

    #[test]
    fn test_reset() {
        let mut info = InfoArray::from_codes(vec![5, 0, 1]);
        info.reset();
        assert_eq!(info.into_vec(), vec![0, 0, 0]);
    }
}
