//! Collision layer constants — centralised для probe фильтров и спавна.
//!
//! - **Layer (битовая маска):** на каком слое объект находится
//! - **Mask (битовая маска):** какие слои query/объект видит
//!
//! Слои:
//! - Layer 1 (0b1 = 1): Default
//! - Layer 2 (0b10 = 2): Characters (capsule мотора)
//! - Layer 3 (0b100 = 4): Environment (terrain, платформы, стены)
//! - Layer 4 (0b1000 = 8): Triggers (никогда не считаются землёй)

/// Layer 1: Default
pub const COLLISION_LAYER_DEFAULT: u32 = 0b1;

/// Layer 2: Characters
pub const COLLISION_LAYER_CHARACTERS: u32 = 0b10;

/// Layer 3: Environment
pub const COLLISION_LAYER_ENVIRONMENT: u32 = 0b100;

/// Layer 4: Triggers
pub const COLLISION_LAYER_TRIGGERS: u32 = 0b1000;

/// Mask: what the grounded probe treats as ground by default.
///
/// Characters не входят: персонаж не "стоит" на собственной capsule.
pub const COLLISION_MASK_GROUND: u32 = COLLISION_LAYER_DEFAULT | COLLISION_LAYER_ENVIRONMENT;

/// Название слоя для debug логов
pub fn layer_name(layer_bits: u32) -> &'static str {
    match layer_bits {
        COLLISION_LAYER_DEFAULT => "Default",
        COLLISION_LAYER_CHARACTERS => "Characters",
        COLLISION_LAYER_ENVIRONMENT => "Environment",
        COLLISION_LAYER_TRIGGERS => "Triggers",
        _ => "Unknown",
    }
}

/// Names of every layer set in `mask` (по возрастанию бита).
pub fn mask_layer_names(mask: u32) -> Vec<&'static str> {
    (0..u32::BITS)
        .map(|bit| 1u32 << bit)
        .filter(|layer| mask & layer != 0)
        .map(layer_name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_mask_excludes_characters_and_triggers() {
        assert_eq!(COLLISION_MASK_GROUND & COLLISION_LAYER_CHARACTERS, 0);
        assert_eq!(COLLISION_MASK_GROUND & COLLISION_LAYER_TRIGGERS, 0);
        assert_ne!(COLLISION_MASK_GROUND & COLLISION_LAYER_ENVIRONMENT, 0);
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(layer_name(COLLISION_LAYER_ENVIRONMENT), "Environment");
        assert_eq!(layer_name(0b1_0000), "Unknown");
    }

    #[test]
    fn test_mask_layer_names() {
        assert_eq!(mask_layer_names(COLLISION_MASK_GROUND), vec!["Default", "Environment"]);
        assert_eq!(
            mask_layer_names(COLLISION_LAYER_TRIGGERS | 0b1_0000),
            vec!["Triggers", "Unknown"]
        );
        assert!(mask_layer_names(0).is_empty());
    }
}
