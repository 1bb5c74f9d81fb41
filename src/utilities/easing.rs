//src/utilities/easing.rs

// easing helpers for per-frame animation and fades

/// Moves `current` a fixed share of the way towards `target`.
/// Repeated every frame this is exponential decay of the gap.
pub fn exp_approach(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// Hermite interpolation between `edge0` and `edge1`, clamped to 0..=1.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
