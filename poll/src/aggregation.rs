//! Aggregation strategies — reduce the finalized ballot set to one result.
//!
//! Every strategy is a pure function of `{weight, ballot}` pairs using
//! checked integer arithmetic. Results are `i128` so that increment polls
//! can move past the `i64` ballot range without wrapping.

use crate::error::PollError;
use crate::params::DomainParams;
use serde::{Deserialize, Serialize};
use stakepoll_types::{Ballot, TokenAmount};
use std::collections::BTreeMap;

/// A recorded ballot together with the weight attached to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedBallot {
    pub weight: TokenAmount,
    pub ballot: Ballot,
}

impl WeightedBallot {
    pub fn new(ballot: Ballot, weight: TokenAmount) -> Self {
        Self { weight, ballot }
    }
}

/// The tally rule of a poll, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationStrategy {
    /// Weighted arithmetic mean, floored.
    Mean,
    /// Weighted median: smallest value holding at least half the weight.
    Median,
    /// Mean over fixed-width cluster midpoints.
    ClusteredMean { width: u64 },
    /// `start + increment · (Σw_true − Σw_false)`.
    Increment,
}

impl AggregationStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Median => "median",
            Self::ClusteredMean { .. } => "clustered_mean",
            Self::Increment => "increment",
        }
    }

    /// Check construction-time parameters.
    pub fn validate(&self) -> Result<(), PollError> {
        match self {
            Self::ClusteredMean { width: 0 } => Err(PollError::InvalidConfig(
                "cluster width must be positive".into(),
            )),
            Self::ClusteredMean { width } if i64::try_from(*width).is_err() => Err(
                PollError::InvalidConfig(format!("cluster width {width} exceeds i64::MAX")),
            ),
            _ => Ok(()),
        }
    }

    /// Check that `domain` is the kind of domain this strategy tallies.
    pub fn validate_domain(&self, domain: &DomainParams) -> Result<(), PollError> {
        match (self, domain) {
            (Self::Increment, DomainParams::Increment { .. }) => Ok(()),
            (Self::Increment, DomainParams::Range { .. }) => Err(PollError::InvalidDomain(
                "increment polls need start/increment parameters".into(),
            )),
            (_, DomainParams::Range { min, max }) if min > max => Err(PollError::InvalidDomain(
                format!("min {min} is greater than max {max}"),
            )),
            (_, DomainParams::Range { .. }) => Ok(()),
            (_, DomainParams::Increment { .. }) => Err(PollError::InvalidDomain(format!(
                "{} polls need min/max bounds",
                self.name()
            ))),
        }
    }

    /// Reduce `ballots` to the poll result.
    pub fn aggregate(
        &self,
        domain: &DomainParams,
        ballots: &[WeightedBallot],
    ) -> Result<i128, PollError> {
        self.validate_domain(domain)?;
        match (self, domain) {
            (Self::Mean, _) => mean(ballots),
            (Self::Median, _) => weighted_median(ballots),
            (Self::ClusteredMean { width }, DomainParams::Range { min, .. }) => {
                clustered_mean(*min, *width, ballots)
            }
            (Self::Increment, DomainParams::Increment { start, increment }) => {
                increment_sum(*start, *increment, ballots)
            }
            // validate_domain rejected every other pairing.
            _ => Err(PollError::InvalidDomain(domain.to_string())),
        }
    }
}

fn weight_i128(weight: TokenAmount) -> Result<i128, PollError> {
    i128::try_from(weight.raw()).map_err(|_| PollError::Overflow)
}

fn scalar(ballot: &Ballot) -> Result<i64, PollError> {
    ballot.as_value().ok_or_else(|| PollError::OutOfDomain {
        ballot: ballot.to_string(),
        domain: "scalar range".into(),
    })
}

fn weighted_mean(
    points: impl Iterator<Item = Result<(i128, i128), PollError>>,
) -> Result<i128, PollError> {
    let mut numerator: i128 = 0;
    let mut total: i128 = 0;
    for point in points {
        let (value, weight) = point?;
        let product = value.checked_mul(weight).ok_or(PollError::Overflow)?;
        numerator = numerator.checked_add(product).ok_or(PollError::Overflow)?;
        total = total.checked_add(weight).ok_or(PollError::Overflow)?;
    }
    if total == 0 {
        return Err(PollError::UndefinedAggregate);
    }
    // total > 0, so Euclidean division is floor division.
    Ok(numerator.div_euclid(total))
}

/// `floor(Σ vᵢ·wᵢ / Σ wᵢ)`.
pub fn mean(ballots: &[WeightedBallot]) -> Result<i128, PollError> {
    weighted_mean(
        ballots
            .iter()
            .map(|b| Ok((i128::from(scalar(&b.ballot)?), weight_i128(b.weight)?))),
    )
}

/// Smallest value whose cumulative weight reaches `ceil(Σw / 2)`.
pub fn weighted_median(ballots: &[WeightedBallot]) -> Result<i128, PollError> {
    let mut buckets: BTreeMap<i64, u128> = BTreeMap::new();
    let mut total: u128 = 0;
    for b in ballots {
        let value = scalar(&b.ballot)?;
        let w = b.weight.raw();
        let slot = buckets.entry(value).or_insert(0);
        *slot = slot.checked_add(w).ok_or(PollError::Overflow)?;
        total = total.checked_add(w).ok_or(PollError::Overflow)?;
    }
    if total == 0 {
        return Err(PollError::UndefinedAggregate);
    }
    let half = total / 2 + total % 2;
    let mut cumulative: u128 = 0;
    for (value, w) in buckets {
        cumulative += w;
        if cumulative >= half {
            return Ok(i128::from(value));
        }
    }
    // cumulative ends at total >= half.
    Err(PollError::UndefinedAggregate)
}

/// Bucket each value into `floor((v − min) / width)` and average the midpoints
/// `min + cluster·width + width/2`.
///
/// Buckets are not clipped to the domain: when `width` does not divide the
/// range, the top bucket's midpoint (and so the result) can exceed `max`.
/// On `[0, 100]` with width 30, a lone ballot of 100 yields 105.
pub fn clustered_mean(
    min: i64,
    width: u64,
    ballots: &[WeightedBallot],
) -> Result<i128, PollError> {
    if width == 0 {
        return Err(PollError::InvalidConfig("cluster width must be positive".into()));
    }
    let min = i128::from(min);
    let width = i128::from(width);
    weighted_mean(ballots.iter().map(|b| {
        let value = i128::from(scalar(&b.ballot)?);
        let cluster = (value - min).div_euclid(width);
        let midpoint = cluster
            .checked_mul(width)
            .and_then(|offset| min.checked_add(offset))
            .and_then(|base| base.checked_add(width / 2))
            .ok_or(PollError::Overflow)?;
        Ok((midpoint, weight_i128(b.weight)?))
    }))
}

/// `start + increment · (Σw_true − Σw_false)`. Defined for an empty ballot set.
pub fn increment_sum(
    start: i64,
    increment: i64,
    ballots: &[WeightedBallot],
) -> Result<i128, PollError> {
    let mut net: i128 = 0;
    for b in ballots {
        let signal = b.ballot.as_signal().ok_or_else(|| PollError::OutOfDomain {
            ballot: b.ballot.to_string(),
            domain: "boolean signal".into(),
        })?;
        let w = weight_i128(b.weight)?;
        net = if signal {
            net.checked_add(w)
        } else {
            net.checked_sub(w)
        }
        .ok_or(PollError::Overflow)?;
    }
    i128::from(increment)
        .checked_mul(net)
        .and_then(|delta| delta.checked_add(i128::from(start)))
        .ok_or(PollError::Overflow)
}
