//! Named colorable areas of the pattern.
//!
//! Identifiers are 1-based and follow the stylesheet class names hosts already use
//! (`circle-3`, `petal-2-3`, `center-petal-5`, `inner-sliver-9`, ...). A leading `sol-` prefix is
//! accepted when parsing.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub const CIRCLE_COUNT: usize = 6;
pub const MAX_INNER_SLIVERS: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionId {
    /// One of the six primary circles, numbered clockwise from the top.
    Circle(u8),
    CenterCircle,
    /// Overlap of circle `n` with circle `n % 6 + 1`.
    Petal(u8),
    /// Overlap of circle `n` with the center disc.
    CenterPetal(u8),
    /// Overlap of circles `n`, `n+1`, `n+2` (mod 6) inside the center disc.
    TriPetal(u8),
    InnerSliver(u8),
    Border,
    Background,
}

impl RegionId {
    /// Region for the primary circle at 0-based layout index `i`.
    pub fn circle_at(i: usize) -> Self {
        Self::Circle(ring_number(i))
    }

    pub fn petal_at(i: usize) -> Self {
        Self::Petal(ring_number(i))
    }

    pub fn center_petal_at(i: usize) -> Self {
        Self::CenterPetal(ring_number(i))
    }

    pub fn tri_petal_at(i: usize) -> Self {
        Self::TriPetal(ring_number(i))
    }

    pub fn inner_sliver_at(i: usize) -> Self {
        Self::InnerSliver((i % MAX_INNER_SLIVERS) as u8 + 1)
    }

    /// Every region the renderer can query, in paint order.
    pub fn all() -> Vec<Self> {
        let mut out = Vec::with_capacity(4 * CIRCLE_COUNT + MAX_INNER_SLIVERS + 3);
        out.extend((0..CIRCLE_COUNT).map(Self::circle_at));
        out.extend((0..CIRCLE_COUNT).map(Self::petal_at));
        out.extend((0..CIRCLE_COUNT).map(Self::center_petal_at));
        out.extend((0..CIRCLE_COUNT).map(Self::tri_petal_at));
        out.extend((0..MAX_INNER_SLIVERS).map(Self::inner_sliver_at));
        out.push(Self::CenterCircle);
        out.push(Self::Border);
        out.push(Self::Background);
        out
    }

    /// Whether a fully transparent color is a legitimate configured value for this region.
    pub fn allows_transparent(self) -> bool {
        matches!(self, Self::CenterCircle)
    }
}

fn ring_number(i: usize) -> u8 {
    (i % CIRCLE_COUNT) as u8 + 1
}

fn next_in_ring(n: u8) -> u8 {
    n % CIRCLE_COUNT as u8 + 1
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Circle(n) => write!(f, "circle-{n}"),
            Self::CenterCircle => f.write_str("circle-center"),
            Self::Petal(n) => write!(f, "petal-{n}-{}", next_in_ring(n)),
            Self::CenterPetal(n) => write!(f, "center-petal-{n}"),
            Self::TriPetal(n) => write!(f, "tri-petal-{n}"),
            Self::InnerSliver(n) => write!(f, "inner-sliver-{n}"),
            Self::Border => f.write_str("border"),
            Self::Background => f.write_str("background"),
        }
    }
}

impl FromStr for RegionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let name = raw.strip_prefix("sol-").unwrap_or(raw);

        fn number(s: &str, max: usize, whole: &str) -> Result<u8, String> {
            let n: usize = s
                .parse()
                .map_err(|_| format!("invalid region number in \"{whole}\""))?;
            if n == 0 || n > max {
                return Err(format!("region number out of range in \"{whole}\" (1..={max})"));
            }
            Ok(n as u8)
        }

        match name {
            "circle-center" => return Ok(Self::CenterCircle),
            "border" => return Ok(Self::Border),
            "background" => return Ok(Self::Background),
            _ => {}
        }

        if let Some(rest) = name.strip_prefix("center-petal-") {
            return Ok(Self::CenterPetal(number(rest, CIRCLE_COUNT, raw)?));
        }
        if let Some(rest) = name.strip_prefix("tri-petal-") {
            return Ok(Self::TriPetal(number(rest, CIRCLE_COUNT, raw)?));
        }
        if let Some(rest) = name.strip_prefix("inner-sliver-") {
            return Ok(Self::InnerSliver(number(rest, MAX_INNER_SLIVERS, raw)?));
        }
        if let Some(rest) = name.strip_prefix("circle-") {
            return Ok(Self::Circle(number(rest, CIRCLE_COUNT, raw)?));
        }
        if let Some(rest) = name.strip_prefix("petal-") {
            let (a, b) = rest
                .split_once('-')
                .ok_or_else(|| format!("petal region needs two circle numbers: \"{raw}\""))?;
            let a = number(a, CIRCLE_COUNT, raw)?;
            let b = number(b, CIRCLE_COUNT, raw)?;
            if next_in_ring(a) != b {
                return Err(format!("petal circles must be adjacent: \"{raw}\""));
            }
            return Ok(Self::Petal(a));
        }

        Err(format!("unknown region \"{raw}\""))
    }
}

impl Serialize for RegionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RegionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
