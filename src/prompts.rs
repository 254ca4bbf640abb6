//! Critique prompt assembly.
//!
//! Builds the two critique-prompt variants sent to the text generator: the
//! compare variant (one failed trial against the final successful trial) and
//! the all-success variant (a batch of successful trajectories). Assembly is
//! plain placeholder substitution over fixed templates.

use crate::insight::InsightList;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// Persona used when the insight list already has entries.
pub const EXISTING_INSIGHTS_AI_NAME: &str =
    "an advanced reasoning agent that can critique past task trajectories and revise its own list of insights";

/// Persona used when the insight list is empty.
pub const NON_EXISTENT_INSIGHTS_AI_NAME: &str =
    "an advanced reasoning agent that can build a list of insights from past task trajectories";

const SYSTEM_TEMPLATE: &str = "You are {ai_name}.\n{instruction}";

const COMPARE_INSTRUCTION: &str = "You will be given two previous trials of the same \
question-answering task: one successful and one unsuccessful. The failed trial either \
committed to a wrong answer or ran out of reasoning steps.";

const ALL_SUCCESS_INSTRUCTION: &str = "You will be given a collection of successful \
question-answering trials. Use them to refine the list of insights so future attempts \
succeed more often.";

const COMPARE_TEMPLATE: &str = "Here are the two trials to compare:

QUESTION:
{question}

SUCCESSFUL TRIAL:
{success_traj}

FAILED TRIAL:
{failed_traj}

Here are the EXISTING INSIGHTS:
{existing_insights}
";

const ALL_SUCCESS_TEMPLATE: &str = "Here are the successful trials:

{success_trajs}

Here are the EXISTING INSIGHTS:
{existing_insights}
";

const SUMMARY_SUFFIX_NOT_FULL: &str = "
By contrasting the trials and examining the existing insights, revise the list with \
operations so it holds general, high-level guidance applicable to unseen questions. \
Follow the format below exactly, one operation per line:

AGREE <EXISTING INSIGHT NUMBER>: <EXISTING INSIGHT>
REMOVE <EXISTING INSIGHT NUMBER>: <EXISTING INSIGHT>
EDIT <EXISTING INSIGHT NUMBER>: <NEW MODIFIED INSIGHT>
ADD <NEW INSIGHT NUMBER>: <NEW INSIGHT>

Do not mention the specific trials inside an insight. Each insight must be a single \
concise sentence ending with a period. Do at most four operations, and give each \
existing insight at most one operation.";

const SUMMARY_SUFFIX_FULL: &str = "
The list of insights is full. Focus on AGREE, REMOVE, and EDIT operations; only ADD \
an insight if it is clearly more valuable than an existing one you REMOVE. Follow the \
format below exactly, one operation per line:

AGREE <EXISTING INSIGHT NUMBER>: <EXISTING INSIGHT>
REMOVE <EXISTING INSIGHT NUMBER>: <EXISTING INSIGHT>
EDIT <EXISTING INSIGHT NUMBER>: <NEW MODIFIED INSIGHT>
ADD <NEW INSIGHT NUMBER>: <NEW INSIGHT>

Do not mention the specific trials inside an insight. Each insight must be a single \
concise sentence ending with a period. Do at most four operations, and give each \
existing insight at most one operation.";

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn system_prefix(insights: &InsightList, instruction: &str) -> String {
    let ai_name = if insights.is_empty() {
        NON_EXISTENT_INSIGHTS_AI_NAME
    } else {
        EXISTING_INSIGHTS_AI_NAME
    };
    SYSTEM_TEMPLATE
        .replace("{ai_name}", ai_name)
        .replace("{instruction}", instruction)
}

fn suffix(is_full: bool) -> &'static str {
    if is_full {
        SUMMARY_SUFFIX_FULL
    } else {
        SUMMARY_SUFFIX_NOT_FULL
    }
}

/// Assemble the compare-variant critique prompt.
pub fn build_compare_prompt(
    insights: &InsightList,
    question: &str,
    success_trial: &str,
    failed_trial: &str,
    is_full: bool,
) -> String {
    let prefix = system_prefix(insights, COMPARE_INSTRUCTION);
    let task = COMPARE_TEMPLATE
        .replace("{question}", question)
        .replace("{success_traj}", success_trial)
        .replace("{failed_traj}", failed_trial)
        .replace("{existing_insights}", &insights.numbered());

    format!("{prefix}\n{task}{}", suffix(is_full))
}

/// Assemble the all-success-variant critique prompt.
pub fn build_all_success_prompt(
    insights: &InsightList,
    success_trajs: &str,
    is_full: bool,
) -> String {
    let prefix = system_prefix(insights, ALL_SUCCESS_INSTRUCTION);
    let task = ALL_SUCCESS_TEMPLATE
        .replace("{success_trajs}", success_trajs)
        .replace("{existing_insights}", &insights.numbered());

    format!("{prefix}\n{task}{}", suffix(is_full))
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Compare prompt ---

    #[test]
    fn compare_prompt_embeds_question_and_both_trials() {
        let insights = InsightList::from_texts(["Search before answering."]);
        let prompt = build_compare_prompt(
            &insights,
            "Who wrote the paper?",
            "Thought: search the index.\nAction: Finish[Smith]",
            "Thought: guess.\nAction: Finish[Jones]",
            false,
        );
        assert!(prompt.contains("Who wrote the paper?"));
        assert!(prompt.contains("Finish[Smith]"));
        assert!(prompt.contains("Finish[Jones]"));
        assert!(prompt.contains("0. Search before answering."));
    }

    #[test]
    fn empty_insight_list_switches_the_persona() {
        let empty = InsightList::new();
        let prompt = build_compare_prompt(&empty, "q", "s", "f", false);
        assert!(prompt.contains(NON_EXISTENT_INSIGHTS_AI_NAME));

        let populated = InsightList::from_texts(["A rule."]);
        let prompt = build_compare_prompt(&populated, "q", "s", "f", false);
        assert!(prompt.contains(EXISTING_INSIGHTS_AI_NAME));
    }

    // --- All-success prompt ---

    #[test]
    fn all_success_prompt_embeds_the_trajectories() {
        let insights = InsightList::new();
        let prompt = build_all_success_prompt(&insights, "trial one\n\ntrial two", false);
        assert!(prompt.contains("trial one\n\ntrial two"));
    }

    // --- Suffix selection ---

    #[test]
    fn is_full_selects_the_full_suffix() {
        let insights = InsightList::from_texts(["A rule."]);
        let full = build_all_success_prompt(&insights, "t", true);
        let not_full = build_all_success_prompt(&insights, "t", false);
        assert!(full.contains("The list of insights is full."));
        assert!(!not_full.contains("The list of insights is full."));
        assert_ne!(full, not_full);
    }
}
