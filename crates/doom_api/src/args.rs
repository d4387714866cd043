//! Command-line style arguments for the engine's `main`.

/// `argv[0]` handed to the engine.
pub const PROGRAM_NAME: &str = "doom";

/// Default `-scaling`: 320x200 divided by 3 is roughly 106x66.
pub const DEFAULT_SCALING: i32 = 3;

/// Build the engine argument list.
///
/// Always `doom -scaling <n>`, followed by `-skill <difficulty>` and then
/// `-episode <episode>` when given. The engine parses flags left to right, so the
/// order never changes. Values are not range-checked.
pub fn build_args(
    episode: Option<i32>,
    difficulty: Option<i32>,
    scaling: Option<i32>,
) -> Vec<String> {
    let mut args = vec![PROGRAM_NAME.to_string()];

    args.push("-scaling".to_string());
    args.push(scaling.unwrap_or(DEFAULT_SCALING).to_string());

    if let Some(difficulty) = difficulty {
        args.push("-skill".to_string());
        args.push(difficulty.to_string());
    }

    if let Some(episode) = episode {
        args.push("-episode".to_string());
        args.push(episode.to_string());
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(build_args(None, None, None), vec!["doom", "-scaling", "3"]);
    }

    #[test]
    fn test_full_order() {
        assert_eq!(
            build_args(Some(1), Some(3), Some(4)),
            vec!["doom", "-scaling", "4", "-skill", "3", "-episode", "1"]
        );
    }

    #[test]
    fn test_optional_flags_omitted() {
        let no_skill = build_args(Some(2), None, None);
        assert!(!no_skill.iter().any(|a| a == "-skill"));
        assert_eq!(no_skill, vec!["doom", "-scaling", "3", "-episode", "2"]);

        let no_episode = build_args(None, Some(5), Some(1));
        assert!(!no_episode.iter().any(|a| a == "-episode"));
        assert_eq!(no_episode, vec!["doom", "-scaling", "1", "-skill", "5"]);
    }

    #[test]
    fn test_out_of_range_values_pass_through() {
        assert_eq!(
            build_args(Some(9), Some(-1), Some(0)),
            vec!["doom", "-scaling", "0", "-skill", "-1", "-episode", "9"]
        );
    }

    #[test]
    fn test_program_name_always_first() {
        for args in [build_args(None, None, None), build_args(Some(4), Some(4), Some(2))] {
            assert_eq!(args[0], PROGRAM_NAME);
            assert_eq!(args[1], "-scaling");
        }
    }
}
