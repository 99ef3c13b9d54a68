//! Static device catalog: selectable battery types plus the auto-derived transformer.

use serde::Serialize;

/// Maximum usable site width in feet. Rows wrap before exceeding it.
pub const SITE_MAX_WIDTH_FT: u32 = 100;

/// Depth of one layout row in feet. Every catalog entry shares this depth.
pub const ROW_DEPTH_FT: u32 = 10;

/// Physical and economic specification of one device type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceSpec {
    /// Unique key, e.g. `"megapack-xl"`.
    pub id: &'static str,
    /// Display label.
    pub name: &'static str,
    /// Footprint width (ft).
    pub width: u32,
    /// Footprint depth (ft).
    pub depth: u32,
    /// Energy yield per unit (MWh). Negative for the transformer.
    pub energy: f64,
    /// Unit price in whole currency units.
    pub cost: u64,
}

/// Closed set of device kinds known to the catalog.
///
/// The transformer is looked up like any other kind but never appears in
/// [`DeviceKind::SELECTABLE`]; its count is derived from the battery total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    MegapackXl,
    Megapack2,
    Megapack,
    PowerPack,
    Transformer,
}

static MEGAPACK_XL: DeviceSpec = DeviceSpec {
    id: "megapack-xl",
    name: "MegapackXL",
    width: 40,
    depth: ROW_DEPTH_FT,
    energy: 4.0,
    cost: 120_000,
};

static MEGAPACK_2: DeviceSpec = DeviceSpec {
    id: "megapack-2",
    name: "Megapack2",
    width: 30,
    depth: ROW_DEPTH_FT,
    energy: 3.0,
    cost: 80_000,
};

static MEGAPACK: DeviceSpec = DeviceSpec {
    id: "megapack",
    name: "Megapack",
    width: 30,
    depth: ROW_DEPTH_FT,
    energy: 2.0,
    cost: 50_000,
};

static POWERPACK: DeviceSpec = DeviceSpec {
    id: "powerpack",
    name: "PowerPack",
    width: 10,
    depth: ROW_DEPTH_FT,
    energy: 1.0,
    cost: 10_000,
};

/// The support device. One is required per two batteries (rounded up).
pub static TRANSFORMER: DeviceSpec = DeviceSpec {
    id: "transformer",
    name: "Transformer",
    width: 10,
    depth: ROW_DEPTH_FT,
    energy: -0.5,
    cost: 10_000,
};

impl DeviceKind {
    /// User-selectable kinds in display order.
    pub const SELECTABLE: [DeviceKind; 4] = [
        DeviceKind::MegapackXl,
        DeviceKind::Megapack2,
        DeviceKind::Megapack,
        DeviceKind::PowerPack,
    ];

    /// Resolves a device id over the selectable kinds and the transformer.
    ///
    /// Returns `None` for any other id, including empty strings.
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "megapack-xl" => Some(Self::MegapackXl),
            "megapack-2" => Some(Self::Megapack2),
            "megapack" => Some(Self::Megapack),
            "powerpack" => Some(Self::PowerPack),
            "transformer" => Some(Self::Transformer),
            _ => None,
        }
    }

    /// Static specification for this kind.
    pub fn spec(self) -> &'static DeviceSpec {
        match self {
            Self::MegapackXl => &MEGAPACK_XL,
            Self::Megapack2 => &MEGAPACK_2,
            Self::Megapack => &MEGAPACK,
            Self::PowerPack => &POWERPACK,
            Self::Transformer => &TRANSFORMER,
        }
    }

    /// Returns `true` for every kind except the transformer.
    pub fn is_selectable(self) -> bool {
        self != Self::Transformer
    }
}

/// Looks up a selectable device or the transformer by id.
///
/// A miss is a normal outcome; callers treat it as a zero contribution.
pub fn lookup(id: &str) -> Option<&'static DeviceSpec> {
    DeviceKind::from_id(id).map(DeviceKind::spec)
}

/// Looks up a device by id, excluding the transformer.
pub fn lookup_selectable(id: &str) -> Option<&'static DeviceSpec> {
    DeviceKind::from_id(id)
        .filter(|kind| kind.is_selectable())
        .map(DeviceKind::spec)
}

/// Iterates the user-selectable specifications in display order.
pub fn selectable() -> impl Iterator<Item = &'static DeviceSpec> {
    DeviceKind::SELECTABLE.into_iter().map(DeviceKind::spec)
}
