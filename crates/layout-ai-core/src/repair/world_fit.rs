//! Arena fitting for world-space layouts

use layout_ai_config::config::WorldSettings;
use layout_ai_config::types::LayoutData;

/// Bring world-space positions into the arena.
///
/// Positions are shrunk uniformly about the origin when their x/z extent
/// exceeds `arena * fit_margin`, then clamped into
/// `±(arena / 2 - padding)` and snapped to multiples of `step`. Heights are
/// left alone. Returns the auto-fit factor that was applied (1.0 for none).
pub fn fit_to_arena(layout: &mut LayoutData, settings: &WorldSettings) -> f32 {
    let [arena_x, arena_z] = settings.arena_size;
    let mut factor = 1.0;
    if settings.auto_fit {
        let margin = settings.effective_fit_margin();
        let (max_x, max_z) = layout.objects.iter().fold((0.0f32, 0.0f32), |(mx, mz), o| {
            (mx.max(o.position.x.abs()), mz.max(o.position.z.abs()))
        });
        factor = fit_factor(max_x, arena_x / 2.0 * margin)
            .min(fit_factor(max_z, arena_z / 2.0 * margin));
        if factor < 1.0 {
            tracing::debug!("Scaling layout by {:.3} to fit the arena", factor);
            for object in &mut layout.objects {
                object.position.x *= factor;
                object.position.z *= factor;
            }
        }
    }

    let limit_x = (arena_x / 2.0 - settings.clamp_padding).max(0.0);
    let limit_z = (arena_z / 2.0 - settings.clamp_padding).max(0.0);
    let step = (settings.snap_to_step && settings.step > 0.0).then_some(settings.step);

    for object in &mut layout.objects {
        let position = &mut object.position;
        if settings.clamp_to_arena {
            position.x = position.x.clamp(-limit_x, limit_x);
            position.z = position.z.clamp(-limit_z, limit_z);
        }
        if let Some(step) = step {
            position.x = snap(position.x, step, settings.clamp_to_arena.then_some(limit_x));
            position.z = snap(position.z, step, settings.clamp_to_arena.then_some(limit_z));
        }
    }

    factor
}

fn fit_factor(extent: f32, allowed: f32) -> f32 {
    if extent > allowed && extent > 0.0 {
        (allowed / extent).max(0.0)
    } else {
        1.0
    }
}

/// Round to the nearest multiple of `step`, stepping back toward the origin
/// when rounding would leave `±limit`.
fn snap(value: f32, step: f32, limit: Option<f32>) -> f32 {
    let snapped = (value / step).round() * step;
    match limit {
        Some(limit) if snapped.abs() > limit => snapped - step * snapped.signum(),
        _ => snapped,
    }
}
