use crate::constants::RIM_CENTRE_X;
use crate::state::BallState;

/// Score for a ball that went through the hoop.
pub const MADE_SHOT_POINTS: f64 = 1_000_000.0;
/// Deducted from a made shot that used the backboard.
pub const BACKBOARD_PENALTY: f64 = 100.0;
/// Lowest score a made shot can have.
pub const MADE_SHOT_THRESHOLD: f64 = MADE_SHOT_POINTS - BACKBOARD_PENALTY;
/// Awarded for reaching the rim band from above.
pub const ON_TARGET_POINTS: f64 = 10_000.0;
/// Awarded for getting higher than the rim at any point.
pub const ABOVE_HOOP_POINTS: f64 = 500.0;

/// Score the ball as it stands.
///
/// Rules:
/// - Outside fun mode a miss that hit the floor first scores 0
/// - Made: 1,000,000, less 100 if the backboard was used
/// - Otherwise partial credit for reaching the rim, height and
///   closeness, with a small penalty for sailing over the backboard
pub fn calculate_score(ball: &BallState, fun_mode: bool) -> f64 {
    let flags = &ball.flags;
    if !fun_mode && flags.bounced_on_floor {
        return 0.0;
    }

    if flags.ball_in_hoop() {
        let mut score = MADE_SHOT_POINTS;
        if flags.hit_backboard {
            score -= BACKBOARD_PENALTY;
        }
        return score;
    }

    let mut score = 0.0;
    if flags.on_target_above_hoop {
        score += ON_TARGET_POINTS;
    }
    if flags.went_above_hoop {
        score += ABOVE_HOOP_POINTS;
    }

    match flags.closest_distance_to_hoop {
        None => {
            score += ball.position.y / 10.0;
            if flags.went_above_backboard {
                score -= 20.0;
            }
            score += f64::min(1000.0 - 25.0 * (ball.position.x - RIM_CENTRE_X).abs(), 100.0);
        },
        Some(closest) => {
            score += f64::min(2000.0 - 250.0 * closest.max(4.0), 50_000.0);
            if flags.went_above_backboard {
                score -= 100.0;
            }
        },
    }

    score
}
