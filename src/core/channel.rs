/*!
The quantum channel pipeline.

The channel between Alice and Bob is modeled as a sequence of zero or
more measure-and-reprepare hops. An eavesdropper is just one hop, so
multi-interceptor or repeater scenarios need no new control flow. Each
hop measures the incoming qubit in a basis of its choosing, then
forwards a fresh qubit encoding its observed bit in that basis. The
re-preparation is what makes interception detectable: a hop whose basis
mismatches Alice's corrupts the state Bob later measures, even when
Bob's own basis matches Alice's.
*/

use crate::core::qubit::{Basis, Bit, Qubit};
use crate::core::random::RandomSource;

/// What a channel hop observed while relaying one qubit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interception {
    /// The basis the hop measured in
    pub basis: Basis,
    /// The bit the hop observed
    pub bit: Bit,
}

/// A single measure-and-reprepare point in the channel.
pub trait ChannelHop {
    /// Measure the incoming qubit, re-prepare, and forward.
    ///
    /// Returns the freshly prepared qubit to forward and a record of
    /// what this hop observed.
    fn relay(&mut self, qubit: Qubit, rng: &mut RandomSource) -> (Qubit, Interception);
}

/// An intercept-resend eavesdropper.
///
/// Picks a uniform random basis per qubit, measures under the standard
/// collapse rule, and forwards her observed bit re-encoded in her own
/// basis. Invisible to Alice and Bob except through the error rate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Eavesdropper;

impl Eavesdropper {
    /// Create a new eavesdropper hop.
    pub fn new() -> Self {
        Self
    }
}

impl ChannelHop for Eavesdropper {
    fn relay(&mut self, qubit: Qubit, rng: &mut RandomSource) -> (Qubit, Interception) {
        let basis = rng.next_basis();
        let bit = qubit.measure(basis, rng);
        (Qubit::new(bit, basis), Interception { basis, bit })
    }
}

/// The transmission medium between Alice and Bob.
///
/// Holds the ordered pipeline of hops a qubit passes through. An empty
/// pipeline is a noise-free direct channel.
#[derive(Default)]
pub struct QuantumChannel {
    hops: Vec<Box<dyn ChannelHop>>,
}

impl QuantumChannel {
    /// Create a direct channel with no hops.
    pub fn new() -> Self {
        Self { hops: Vec::new() }
    }

    /// Add a hop to the end of the pipeline.
    pub fn with_hop(mut self, hop: Box<dyn ChannelHop>) -> Self {
        self.hops.push(hop);
        self
    }

    /// Number of hops in the pipeline.
    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// Transmit one qubit through every hop in order.
    ///
    /// Returns the qubit as it arrives at the far end, plus each hop's
    /// observation in pipeline order. On a direct channel the qubit
    /// arrives untouched.
    pub fn transmit(
        &mut self,
        qubit: Qubit,
        rng: &mut RandomSource,
    ) -> (Qubit, Vec<Interception>) {
        let mut current = qubit;
        let mut interceptions = Vec::with_capacity(self.hops.len());

        for hop in &mut self.hops {
            let (forwarded, observed) = hop.relay(current, rng);
            current = forwarded;
            interceptions.push(observed);
        }

        (current, interceptions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_channel_preserves_qubit() {
        let mut channel = QuantumChannel::new();
        let mut rng = RandomSource::seeded(5);

        let qubit = Qubit::new(Bit::One, Basis::Diagonal);
        let (arrived, interceptions) = channel.transmit(qubit, &mut rng);

        assert_eq!(arrived, qubit);
        assert!(interceptions.is_empty());
    }

    #[test]
    fn test_eavesdropper_reprepares_in_own_basis() {
        let mut channel = QuantumChannel::new().with_hop(Box::new(Eavesdropper::new()));
        let mut rng = RandomSource::seeded(11);

        for _ in 0..200 {
            let qubit = Qubit::new(Bit::Zero, Basis::Rectilinear);
            let (arrived, interceptions) = channel.transmit(qubit, &mut rng);

            assert_eq!(interceptions.len(), 1);
            let eve = interceptions[0];

            // The forwarded qubit always reflects Eve's observation.
            assert_eq!(arrived.bit(), eve.bit);
            assert_eq!(arrived.basis(), eve.basis);

            // When her basis matched, Eve read Alice's bit exactly.
            if eve.basis == Basis::Rectilinear {
                assert_eq!(eve.bit, Bit::Zero);
            }
        }
    }

    #[test]
    fn test_eavesdropper_corrupts_quarter_of_matched_measurements() {
        // Alice encodes, Eve intercepts, Bob measures in Alice's basis.
        // Expected corruption: Eve mismatches with p=0.5, and a
        // mismatched re-preparation flips Bob's outcome with p=0.5.
        let mut channel = QuantumChannel::new().with_hop(Box::new(Eavesdropper::new()));
        let mut rng = RandomSource::seeded(23);
        let trials = 10_000;

        let mut corrupted = 0;
        for _ in 0..trials {
            let qubit = Qubit::new(Bit::One, Basis::Diagonal);
            let (arrived, _) = channel.transmit(qubit, &mut rng);
            if arrived.measure(Basis::Diagonal, &mut rng) != Bit::One {
                corrupted += 1;
            }
        }

        let rate = corrupted as f64 / trials as f64;
        assert!((0.22..=0.28).contains(&rate), "corruption rate = {}", rate);
    }

    #[test]
    fn test_two_hops_relay_in_order() {
        let mut channel = QuantumChannel::new()
            .with_hop(Box::new(Eavesdropper::new()))
            .with_hop(Box::new(Eavesdropper::new()));
        let mut rng = RandomSource::seeded(17);

        let (arrived, interceptions) = channel.transmit(
            Qubit::new(Bit::Zero, Basis::Rectilinear),
            &mut rng,
        );

        assert_eq!(channel.hop_count(), 2);
        assert_eq!(interceptions.len(), 2);

        // The second hop's re-preparation is what reaches the far end.
        assert_eq!(arrived.bit(), interceptions[1].bit);
        assert_eq!(arrived.basis(), interceptions[1].basis);
    }
}
