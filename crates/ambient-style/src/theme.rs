//! Static sub-theme configuration.
//!
//! One [`SubTheme`] per named visual style: a semantic HSL palette, the
//! renderer identifier it drives, and numeric tuning knobs. Records are
//! grouped by genre family purely for source organization. All of this is
//! immutable data loaded at process start; the engine consumes it and never
//! writes it back.
//!
//! Several sub-themes deliberately reuse another family's renderer under
//! their own palette (`spaceOpera` runs the starfield, `goldenAge` the
//! constellation map). That re-skinning is content, not accident; do not
//! collapse the entries.

/// Numeric tuning and renderer selection for a sub-theme.
///
/// `special` is descriptive metadata only (badge copy in the theme picker);
/// no renderer reads it.
#[derive(Debug, Clone, Copy)]
pub struct EffectTuning {
    /// Renderer identifier resolved through the effect registry.
    pub renderer: &'static str,
    /// Glow strength multiplier in `[0, 1]`.
    pub glow_intensity: f32,
    /// Particle speed multiplier.
    pub particle_speed: f32,
    /// Suggested particle population.
    pub particle_count: u32,
    /// Free-form named special-effect tags.
    pub special: &'static [&'static str],
}

/// A named visual style: palette plus effect tuning.
///
/// Colors are HSL triplet strings (`"hue sat% light%"`) parsed leniently by
/// [`crate::color::parse_triplet`].
#[derive(Debug, Clone, Copy)]
pub struct SubTheme {
    /// Stable identifier referenced by the settings layer.
    pub id: &'static str,
    /// Primary theme color.
    pub primary: &'static str,
    /// Accent color.
    pub accent: &'static str,
    /// Secondary color.
    pub secondary: &'static str,
    /// Renderer selection and tuning.
    pub effects: EffectTuning,
}

const fn tuning(
    renderer: &'static str,
    glow_intensity: f32,
    particle_speed: f32,
    particle_count: u32,
    special: &'static [&'static str],
) -> EffectTuning {
    EffectTuning {
        renderer,
        glow_intensity,
        particle_speed,
        particle_count,
        special,
    }
}

/// All sub-themes, grouped by genre family. The first entry is the default.
pub const SUB_THEMES: &[SubTheme] = &[
    // -- default ----------------------------------------------------------
    SubTheme {
        id: "quietLibrary",
        primary: "38 30% 55%",
        accent: "28 60% 50%",
        secondary: "220 15% 40%",
        effects: tuning("inkDust", 0.5, 0.4, 60, &["paperGrain"]),
    },
    SubTheme {
        id: "midnightDesk",
        primary: "220 70% 50%",
        accent: "45 90% 60%",
        secondary: "260 40% 35%",
        effects: tuning("starfield", 0.8, 0.3, 120, &["twinkle"]),
    },
    SubTheme {
        id: "summerDusk",
        primary: "95 55% 45%",
        accent: "55 95% 60%",
        secondary: "30 40% 30%",
        effects: tuning("fireflies", 0.9, 0.5, 24, &["pulseGlow"]),
    },
    SubTheme {
        id: "softFocus",
        primary: "320 30% 60%",
        accent: "40 60% 70%",
        secondary: "200 25% 50%",
        effects: tuning("bokehDrift", 0.7, 0.25, 18, &["depthBlur"]),
    },
    SubTheme {
        id: "hearthside",
        primary: "18 85% 55%",
        accent: "38 95% 60%",
        secondary: "0 50% 30%",
        effects: tuning("emberRise", 0.9, 0.7, 40, &["heatShimmer"]),
    },
    // -- fantasy ----------------------------------------------------------
    SubTheme {
        id: "enchantedForest",
        primary: "140 50% 40%",
        accent: "80 70% 55%",
        secondary: "280 35% 45%",
        effects: tuning("sporeDrift", 0.7, 0.35, 80, &["canopyLight"]),
    },
    SubTheme {
        id: "faerieCourt",
        primary: "290 65% 60%",
        accent: "180 80% 65%",
        secondary: "45 90% 70%",
        effects: tuning("faerieLights", 1.0, 0.6, 30, &["hueShimmer"]),
    },
    SubTheme {
        id: "ancientRunes",
        primary: "205 45% 50%",
        accent: "185 90% 55%",
        secondary: "250 30% 35%",
        effects: tuning("runeRise", 0.85, 0.4, 26, &["glyphGlow"]),
    },
    SubTheme {
        id: "dragonsKeep",
        primary: "10 80% 50%",
        accent: "35 95% 55%",
        secondary: "0 60% 25%",
        effects: tuning("dragonFire", 1.0, 0.8, 0, &["fireSilhouette"]),
    },
    SubTheme {
        id: "witchsApothecary",
        primary: "120 45% 40%",
        accent: "290 60% 55%",
        secondary: "160 35% 30%",
        effects: tuning("potionBrew", 0.8, 0.5, 0, &["hueDriftSmoke"]),
    },
    // -- horror -----------------------------------------------------------
    SubTheme {
        id: "mistHollow",
        primary: "200 15% 35%",
        accent: "160 10% 50%",
        secondary: "220 20% 20%",
        effects: tuning("creepingFog", 0.4, 0.2, 14, &["lowVisibility"]),
    },
    SubTheme {
        id: "crimsonManor",
        primary: "0 75% 40%",
        accent: "350 85% 50%",
        secondary: "0 30% 15%",
        effects: tuning("bloodDrips", 0.6, 0.5, 0, &["slowDrip"]),
    },
    SubTheme {
        id: "seanceRoom",
        primary: "40 70% 55%",
        accent: "30 90% 60%",
        secondary: "260 20% 25%",
        effects: tuning("candleFlicker", 0.9, 0.3, 0, &["flicker"]),
    },
    SubTheme {
        id: "abyssalDepths",
        primary: "260 55% 35%",
        accent: "180 60% 40%",
        secondary: "290 45% 20%",
        effects: tuning("tentacleWrithe", 0.7, 0.3, 7, &["writhe"]),
    },
    SubTheme {
        id: "hauntedWing",
        primary: "210 20% 55%",
        accent: "180 30% 65%",
        secondary: "240 15% 30%",
        effects: tuning("ghostOrbs", 0.8, 0.2, 12, &["alphaPulse"]),
    },
    // -- sci-fi -----------------------------------------------------------
    SubTheme {
        id: "neonSprawl",
        primary: "315 90% 55%",
        accent: "180 95% 50%",
        secondary: "260 70% 40%",
        effects: tuning("neonRain", 0.9, 1.2, 140, &["neonStreak"]),
    },
    SubTheme {
        id: "ghostShell",
        primary: "130 85% 45%",
        accent: "150 95% 55%",
        secondary: "120 40% 25%",
        effects: tuning("codeFall", 0.8, 1.0, 48, &["codeTrail"]),
    },
    SubTheme {
        id: "jumpGate",
        primary: "220 80% 60%",
        accent: "200 95% 70%",
        secondary: "250 60% 45%",
        effects: tuning("warpStars", 0.9, 1.5, 90, &["radialStreak"]),
    },
    SubTheme {
        id: "driftNebula",
        primary: "275 70% 50%",
        accent: "320 80% 60%",
        secondary: "230 60% 35%",
        effects: tuning("nebulaPulse", 0.7, 0.2, 9, &["slowPulse"]),
    },
    SubTheme {
        id: "orbitalRelay",
        primary: "190 85% 50%",
        accent: "170 90% 55%",
        secondary: "210 50% 30%",
        effects: tuning("holoGrid", 0.6, 0.5, 0, &["scanline"]),
    },
    // -- dystopia ---------------------------------------------------------
    SubTheme {
        id: "cinderWastes",
        primary: "20 25% 40%",
        accent: "35 40% 50%",
        secondary: "0 15% 20%",
        effects: tuning("ashFall", 0.4, 0.35, 70, &["greyout"]),
    },
    SubTheme {
        id: "factoryHaze",
        primary: "45 30% 45%",
        accent: "30 50% 40%",
        secondary: "60 20% 25%",
        effects: tuning("smogBands", 0.3, 0.2, 0, &["layeredSmog"]),
    },
    SubTheme {
        id: "curfewZone",
        primary: "0 85% 50%",
        accent: "15 95% 55%",
        secondary: "0 40% 20%",
        effects: tuning("alarmPulse", 0.8, 1.0, 0, &["binaryFlash"]),
    },
    SubTheme {
        id: "falloutShelter",
        primary: "65 80% 50%",
        accent: "55 95% 55%",
        secondary: "80 30% 25%",
        effects: tuning("radiationPulse", 0.8, 0.6, 0, &["warningRings"]),
    },
    SubTheme {
        id: "borderWatch",
        primary: "210 30% 45%",
        accent: "50 90% 60%",
        secondary: "220 20% 25%",
        effects: tuning("searchlights", 0.7, 0.4, 3, &["sweep"]),
    },
    // -- utopia / steampunk ------------------------------------------------
    SubTheme {
        id: "brassWorks",
        primary: "40 60% 50%",
        accent: "30 80% 55%",
        secondary: "25 40% 30%",
        effects: tuning("gearWorks", 0.6, 0.5, 6, &["gearTeeth"]),
    },
    SubTheme {
        id: "boilerDeck",
        primary: "30 25% 55%",
        accent: "40 40% 65%",
        secondary: "20 20% 35%",
        effects: tuning("steamVents", 0.5, 0.6, 0, &["ventPuff"]),
    },
    SubTheme {
        id: "gildedPromenade",
        primary: "45 75% 60%",
        accent: "50 90% 70%",
        secondary: "35 50% 40%",
        effects: tuning("brassMotes", 0.8, 0.3, 50, &["glint"]),
    },
    SubTheme {
        id: "crystalAtrium",
        primary: "165 60% 55%",
        accent: "190 80% 65%",
        secondary: "140 40% 40%",
        effects: tuning("lightShafts", 0.7, 0.15, 5, &["godRays"]),
    },
    SubTheme {
        id: "skyHarbor",
        primary: "205 70% 60%",
        accent: "35 80% 65%",
        secondary: "220 40% 45%",
        effects: tuning("driftClouds", 0.5, 0.25, 8, &["parallax"]),
    },
    // -- romance ----------------------------------------------------------
    SubTheme {
        id: "cherryLane",
        primary: "340 70% 65%",
        accent: "350 85% 75%",
        secondary: "320 40% 50%",
        effects: tuning("petalDrift", 0.7, 0.45, 36, &["sway"]),
    },
    SubTheme {
        id: "loveLetters",
        primary: "350 80% 60%",
        accent: "0 90% 70%",
        secondary: "330 50% 45%",
        effects: tuning("heartMotes", 0.8, 0.3, 0, &["fadeInOut"]),
    },
    SubTheme {
        id: "candlelitDinner",
        primary: "25 85% 60%",
        accent: "40 95% 70%",
        secondary: "15 50% 35%",
        effects: tuning("candleGlow", 1.0, 0.2, 0, &["breathingGlow"]),
    },
    SubTheme {
        id: "silkBoudoir",
        primary: "315 55% 55%",
        accent: "345 70% 65%",
        secondary: "290 35% 40%",
        effects: tuning("silkRibbons", 0.6, 0.35, 4, &["ribbonWave"]),
    },
    SubTheme {
        id: "sealedPromise",
        primary: "355 75% 50%",
        accent: "10 85% 60%",
        secondary: "0 45% 30%",
        effects: tuning("waxDrips", 0.7, 0.25, 0, &["slowWax"]),
    },
    // -- thriller / mystery / adventure -----------------------------------
    SubTheme {
        id: "stakeoutNight",
        primary: "205 40% 45%",
        accent: "195 60% 55%",
        secondary: "220 30% 25%",
        effects: tuning("rainOnGlass", 0.6, 0.9, 90, &["glassRipple"]),
    },
    SubTheme {
        id: "darkCellar",
        primary: "50 85% 60%",
        accent: "45 95% 70%",
        secondary: "220 20% 15%",
        effects: tuning("flashlightSweep", 0.8, 0.5, 0, &["beamSweep"]),
    },
    SubTheme {
        id: "detectivesOffice",
        primary: "35 30% 50%",
        accent: "45 50% 60%",
        secondary: "25 20% 30%",
        effects: tuning("smokeCurl", 0.5, 0.3, 0, &["hueDriftSmoke"]),
    },
    SubTheme {
        id: "lostExpedition",
        primary: "40 55% 50%",
        accent: "30 70% 55%",
        secondary: "200 30% 35%",
        effects: tuning("compassRose", 0.6, 0.3, 0, &["needleSwing"]),
    },
    SubTheme {
        id: "stormFront",
        primary: "230 45% 45%",
        accent: "55 95% 70%",
        secondary: "240 30% 25%",
        effects: tuning("lightningStorm", 0.9, 1.0, 0, &["boltFlash"]),
    },
    // -- historical -------------------------------------------------------
    SubTheme {
        id: "scriptorium",
        primary: "38 45% 55%",
        accent: "30 60% 50%",
        secondary: "45 25% 35%",
        effects: tuning("parchmentDust", 0.5, 0.3, 55, &["sepia"]),
    },
    SubTheme {
        id: "inkAndQuill",
        primary: "220 25% 35%",
        accent: "210 40% 45%",
        secondary: "230 15% 20%",
        effects: tuning("inkRipples", 0.6, 0.4, 0, &["inkBloom"]),
    },
    SubTheme {
        id: "monasteryNight",
        primary: "40 60% 55%",
        accent: "35 80% 65%",
        secondary: "30 30% 30%",
        effects: tuning("candleSmoke", 0.7, 0.25, 0, &["waftSmoke"]),
    },
    SubTheme {
        id: "navigatorsChart",
        primary: "215 55% 50%",
        accent: "45 85% 65%",
        secondary: "230 35% 30%",
        effects: tuning("constellations", 0.8, 0.15, 40, &["starLines"]),
    },
    SubTheme {
        id: "harvestFestival",
        primary: "30 75% 50%",
        accent: "15 85% 55%",
        secondary: "45 55% 35%",
        effects: tuning("leafFall", 0.6, 0.4, 30, &["tumble"]),
    },
    // -- alias sub-themes (reuse another family's renderer, own palette) ---
    SubTheme {
        id: "spaceOpera",
        primary: "255 80% 60%",
        accent: "290 90% 70%",
        secondary: "230 60% 40%",
        effects: tuning("spaceOpera", 0.9, 0.4, 150, &["twinkle"]),
    },
    SubTheme {
        id: "noirAlley",
        primary: "0 0% 70%",
        accent: "0 0% 90%",
        secondary: "220 10% 25%",
        effects: tuning("noirSmoke", 0.4, 0.25, 0, &["monochrome"]),
    },
    SubTheme {
        id: "goldenAge",
        primary: "45 85% 60%",
        accent: "40 95% 70%",
        secondary: "35 55% 40%",
        effects: tuning("goldenAge", 0.9, 0.15, 45, &["starLines"]),
    },
    SubTheme {
        id: "courtIntrigue",
        primary: "280 50% 50%",
        accent: "45 90% 65%",
        secondary: "300 35% 30%",
        effects: tuning("courtIntrigue", 1.0, 0.2, 0, &["breathingGlow"]),
    },
    SubTheme {
        id: "deepWinter",
        primary: "200 30% 70%",
        accent: "190 50% 85%",
        secondary: "220 25% 45%",
        effects: tuning("deepWinter", 0.5, 0.3, 80, &["coldHush"]),
    },
];

/// Look up a sub-theme by id, falling back to the default (first) entry.
#[must_use]
pub fn sub_theme(id: &str) -> &'static SubTheme {
    SUB_THEMES
        .iter()
        .find(|t| t.id == id)
        .unwrap_or(&SUB_THEMES[0])
}

/// Number of configured sub-themes.
#[must_use]
pub const fn sub_theme_count() -> usize {
    SUB_THEMES.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_id() {
        assert_eq!(sub_theme("neonSprawl").effects.renderer, "neonRain");
    }

    #[test]
    fn lookup_unknown_falls_back_to_default() {
        let t = sub_theme("doesNotExist");
        assert_eq!(t.id, "quietLibrary");
    }

    #[test]
    fn lookup_empty_falls_back() {
        assert_eq!(sub_theme("").id, "quietLibrary");
    }

    #[test]
    fn ids_are_unique() {
        for (i, a) in SUB_THEMES.iter().enumerate() {
            for b in &SUB_THEMES[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate sub-theme id");
            }
        }
    }

    #[test]
    fn palettes_parse_to_sane_ranges() {
        for t in SUB_THEMES {
            for s in [t.primary, t.accent, t.secondary] {
                let c = crate::color::parse_triplet(s);
                assert!((0.0..=360.0).contains(&c.h), "{}: hue {}", t.id, c.h);
                assert!((0.0..=100.0).contains(&c.s), "{}: sat {}", t.id, c.s);
                assert!((0.0..=100.0).contains(&c.l), "{}: light {}", t.id, c.l);
            }
        }
    }
}
