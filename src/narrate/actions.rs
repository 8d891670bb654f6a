use crate::action::Action;
use crate::mode::ScenarioMode;

/// Etiquette appended to the action menu on roundabouts.
const ROUNDABOUT_REMINDERS: &str = "\nRemember:\n\
- Always yield to vehicles already in the roundabout.\n\
- Use the outer lane if you're planning to exit soon.\n\
- Use the inner lane for going further around the roundabout.\n\
- Signal before exiting the roundabout.\n";

/// Lists the legal actions with their IDs, one per line.
pub fn describe_actions(actions: &[Action], mode: ScenarioMode) -> String {
    let mut description = "Your available actions are: \n".to_owned();
    for action in actions {
        description += &format!("{} Action_id: {}\n", action.description(), action.id());
    }
    if mode == ScenarioMode::Roundabout {
        description += ROUNDABOUT_REMINDERS;
    }
    description
}
