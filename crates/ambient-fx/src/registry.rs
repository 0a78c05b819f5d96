//! Renderer registry: identifier -> effect constructor.

use std::collections::HashMap;

use tracing::debug;

use crate::contract::SceneFx;
use crate::effects::{
    defaults, dystopia, fantasy, historical, horror, romance, scifi, thriller, utopia,
};

/// Constructor for a boxed effect.
pub type FxConstructor = fn() -> Box<dyn SceneFx>;

/// Identifier the registry falls back to for unknown lookups.
pub const FALLBACK_ID: &str = "inkDust";

/// Maps renderer identifiers to constructors.
///
/// Lookup never fails: an unknown or empty identifier resolves to the
/// fallback effect. The registry is a plain value, so tests can build a
/// substitute with stub constructors instead of patching a global.
pub struct FxRegistry {
    constructors: HashMap<&'static str, FxConstructor>,
}

impl FxRegistry {
    /// An empty registry. [`FxRegistry::create`] on an empty registry still
    /// returns the fallback effect.
    #[must_use]
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// The full production roster: one constructor per renderer identifier,
    /// plus aliases for sub-themes that share a renderer.
    #[must_use]
    pub fn standard() -> Self {
        let mut reg = Self::new();

        reg.register("inkDust", || Box::new(defaults::InkDustFx::new()));
        reg.register("starfield", || Box::new(defaults::StarfieldFx::new()));
        reg.register("fireflies", || Box::new(defaults::FirefliesFx::new()));
        reg.register("bokehDrift", || Box::new(defaults::BokehDriftFx::new()));
        reg.register("emberRise", || Box::new(defaults::EmberRiseFx::new()));

        reg.register("sporeDrift", || Box::new(fantasy::SporeDriftFx::new()));
        reg.register("faerieLights", || Box::new(fantasy::FaerieLightsFx::new()));
        reg.register("runeRise", || Box::new(fantasy::RuneRiseFx::new()));
        reg.register("dragonFire", || Box::new(fantasy::DragonFireFx::new()));
        reg.register("potionBrew", || Box::new(fantasy::PotionBrewFx::new()));

        reg.register("creepingFog", || Box::new(horror::CreepingFogFx::new()));
        reg.register("bloodDrips", || Box::new(horror::BloodDripsFx::new()));
        reg.register("candleFlicker", || Box::new(horror::CandleFlickerFx::new()));
        reg.register("tentacleWrithe", || Box::new(horror::TentacleWritheFx::new()));
        reg.register("ghostOrbs", || Box::new(horror::GhostOrbsFx::new()));

        reg.register("neonRain", || Box::new(scifi::NeonRainFx::new()));
        reg.register("codeFall", || Box::new(scifi::CodeFallFx::new()));
        reg.register("warpStars", || Box::new(scifi::WarpStarsFx::new()));
        reg.register("nebulaPulse", || Box::new(scifi::NebulaPulseFx::new()));
        reg.register("holoGrid", || Box::new(scifi::HoloGridFx::new()));

        reg.register("ashFall", || Box::new(dystopia::AshFallFx::new()));
        reg.register("smogBands", || Box::new(dystopia::SmogBandsFx::new()));
        reg.register("alarmPulse", || Box::new(dystopia::AlarmPulseFx::new()));
        reg.register("radiationPulse", || {
            Box::new(dystopia::RadiationPulseFx::new())
        });
        reg.register("searchlights", || Box::new(dystopia::SearchlightsFx::new()));

        reg.register("gearWorks", || Box::new(utopia::GearWorksFx::new()));
        reg.register("steamVents", || Box::new(utopia::SteamVentsFx::new()));
        reg.register("brassMotes", || Box::new(utopia::BrassMotesFx::new()));
        reg.register("lightShafts", || Box::new(utopia::LightShaftsFx::new()));
        reg.register("driftClouds", || Box::new(utopia::DriftCloudsFx::new()));

        reg.register("petalDrift", || Box::new(romance::PetalDriftFx::new()));
        reg.register("heartMotes", || Box::new(romance::HeartMotesFx::new()));
        reg.register("candleGlow", || Box::new(romance::CandleGlowFx::new()));
        reg.register("silkRibbons", || Box::new(romance::SilkRibbonsFx::new()));
        reg.register("waxDrips", || Box::new(romance::WaxDripsFx::new()));

        reg.register("rainOnGlass", || Box::new(thriller::RainOnGlassFx::new()));
        reg.register("flashlightSweep", || {
            Box::new(thriller::FlashlightSweepFx::new())
        });
        reg.register("smokeCurl", || Box::new(thriller::SmokeCurlFx::new()));
        reg.register("compassRose", || Box::new(thriller::CompassRoseFx::new()));
        reg.register("lightningStorm", || {
            Box::new(thriller::LightningStormFx::new())
        });

        reg.register("parchmentDust", || {
            Box::new(historical::ParchmentDustFx::new())
        });
        reg.register("inkRipples", || Box::new(historical::InkRipplesFx::new()));
        reg.register("candleSmoke", || Box::new(historical::CandleSmokeFx::new()));
        reg.register("constellations", || {
            Box::new(historical::ConstellationsFx::new())
        });
        reg.register("leafFall", || Box::new(historical::LeafFallFx::new()));

        // Sub-themes whose renderer is shared with another entry.
        reg.alias("spaceOpera", "starfield");
        reg.alias("noirSmoke", "smokeCurl");
        reg.alias("goldenAge", "constellations");
        reg.alias("courtIntrigue", "candleGlow");
        reg.alias("deepWinter", "ashFall");

        reg
    }

    /// Register (or replace) a constructor for an identifier.
    pub fn register(&mut self, id: &'static str, ctor: FxConstructor) {
        self.constructors.insert(id, ctor);
    }

    /// Point `id` at the constructor already registered under `target`.
    /// Unknown targets are ignored.
    pub fn alias(&mut self, id: &'static str, target: &str) {
        if let Some(ctor) = self.constructors.get(target).copied() {
            self.constructors.insert(id, ctor);
        }
    }

    /// True if `id` resolves without falling back.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.constructors.contains_key(id)
    }

    /// Registered identifiers, unordered.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    /// Number of registered identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// True if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Construct the effect for `id`, falling back to the default renderer
    /// for unknown identifiers. Never fails.
    #[must_use]
    pub fn create(&self, id: &str) -> Box<dyn SceneFx> {
        if let Some(ctor) = self.constructors.get(id) {
            return ctor();
        }
        debug!(renderer = id, fallback = FALLBACK_ID, "unknown renderer, using fallback");
        match self.constructors.get(FALLBACK_ID) {
            Some(ctor) => ctor(),
            // Even a registry missing the fallback entry must produce
            // something drawable.
            None => Box::new(defaults::InkDustFx::new()),
        }
    }
}

impl Default for FxRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
