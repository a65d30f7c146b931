//! State-specific prompt templates.

use crate::{AgentState, SessionContext};

/// Fallback when no task description has been stored.
const NO_TASK_DESCRIPTION: &str = "No task description provided";

/// Fallback when no research topic has been stored.
const NO_RESEARCH_TOPIC: &str = "No research topic provided";

/// Fallback when no action plan has been stored.
const NO_ACTION_PLAN: &str = "No action plan provided";

/// Fallback when no error description has been stored.
const NO_ERROR_DESCRIPTION: &str = "Unknown error";

/// Renders the instructional prompt for each state.
///
/// `Idle` and `Reviewing` templates take no parameters. The other templates
/// pull exactly one value out of the task-data store and fall back to a
/// fixed placeholder when it is missing, so rendering never fails and never
/// mutates the context.
pub struct PromptCatalog;

impl PromptCatalog {
    /// Render the prompt for `state`, reading parameters from `context`.
    pub fn render(state: AgentState, context: &SessionContext) -> String {
        match state {
            AgentState::Idle => IDLE_PROMPT.to_string(),
            AgentState::Planning => planning_prompt(
                context.task_data("task_description").unwrap_or(NO_TASK_DESCRIPTION),
            ),
            AgentState::Researching => researching_prompt(
                context.task_data("research_topic").unwrap_or(NO_RESEARCH_TOPIC),
            ),
            AgentState::Executing => {
                executing_prompt(context.task_data("action_plan").unwrap_or(NO_ACTION_PLAN))
            }
            AgentState::Reviewing => REVIEWING_PROMPT.to_string(),
            AgentState::Error => error_prompt(
                context.task_data("error_description").unwrap_or(NO_ERROR_DESCRIPTION),
            ),
        }
    }
}

const IDLE_PROMPT: &str = "\
I am currently in Idle state, waiting for instructions.

What would you like me to do? I can:

1. Help you plan a task (transition to Planning)
2. Research a topic (transition to Researching)
3. Execute a specific action (transition to Executing)

Please provide your instructions, and I'll assist you accordingly.
";

fn planning_prompt(task_description: &str) -> String {
    format!(
        "\
I am currently in Planning state.

Task to plan: {}

I'll break this down into steps:

1. First, I'll analyze what the task requires
2. Then, I'll identify the necessary sub-tasks
3. Finally, I'll create a structured plan with clear steps

After completing the plan, I can:
- Move to Researching if we need more information
- Move to Executing if we're ready to act
- Return to Idle if we need to reconsider
",
        task_description
    )
}

fn researching_prompt(research_topic: &str) -> String {
    format!(
        "\
I am currently in Researching state.

Research topic: {}

I'll gather information on this topic by:

1. Recalling relevant knowledge I already have
2. Finding authoritative sources of information
3. Organizing the information in a structured way

Once research is complete, I can:
- Return to Planning with new insights
- Move to Executing if we have enough information
- Go to Reviewing if we need to assess the findings
",
        research_topic
    )
}

fn executing_prompt(action_plan: &str) -> String {
    format!(
        "\
I am currently in Executing state.

Action plan:
{}

I'll now execute this plan step by step, providing updates as I go.

I'll focus on:
1. Following the plan precisely
2. Handling any unexpected situations
3. Recording the results of each step

After execution, I'll move to Reviewing to evaluate the results.
",
        action_plan
    )
}

const REVIEWING_PROMPT: &str = "\
I am currently in Reviewing state.

I'll now review what has been done so far:

1. Examine the actions taken and their outcomes
2. Compare results against the original objectives
3. Identify any gaps or areas for improvement

Based on this review, I can:
- Return to Planning if adjustments are needed
- Move to Executing for further actions
- Return to Idle if the task is complete
";

fn error_prompt(error_description: &str) -> String {
    format!(
        "\
I am currently in Error state.

Error: {}

I'll help resolve this issue by:

1. Analyzing what went wrong
2. Suggesting possible solutions
3. Providing guidance on next steps

After addressing the error, we can transition to an appropriate state to continue.
",
        error_description
    )
}
