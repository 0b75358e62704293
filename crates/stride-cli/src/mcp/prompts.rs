//! Prompt templates for the MCP server

use std::sync::LazyLock;

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

impl PromptTemplate {
    /// Substitutes `{name}` placeholders with the supplied values.
    ///
    /// Placeholders of optional arguments that were not supplied are replaced
    /// with the argument's fallback text.
    pub fn apply<'a>(&self, lookup: impl Fn(&str) -> Option<&'a str>) -> Result<String, String> {
        let mut text = self.template.clone();
        for arg in &self.arguments {
            let placeholder = format!("{{{}}}", arg.name);
            match lookup(&arg.name) {
                Some(value) if !value.trim().is_empty() => {
                    text = text.replace(&placeholder, value.trim());
                }
                _ if arg.required => {
                    return Err(format!("Required argument '{}' is missing", arg.name));
                }
                _ => text = text.replace(&placeholder, "no limit"),
            }
        }
        Ok(text)
    }
}

pub static PROMPT_TEMPLATES: LazyLock<Vec<PromptTemplate>> = LazyLock::new(prompt_templates);

fn prompt_templates() -> Vec<PromptTemplate> {
    vec![PromptTemplate {
        name: "decompose_goal".to_string(),
        description: "Break a goal down into ordered tasks and store them as a Stride plan"
            .to_string(),
        template: r#"You are **Stride Planner**, an expert at turning goals into realistic, ordered task lists.

# Goal
{goal}

# Task count
Aim for 5-10 tasks ({max_tasks}).

# Your Task
Decompose the goal into tasks and store them with the `import_plan` tool.

## Task Structure
Each task is a JSON object:
```json
{
  "order": 1,
  "title": "Short imperative title",
  "description": "What to do and what done looks like",
  "dependsOn": null,
  "estimatedDays": 2
}
```

- **order**: 1-based position; tasks are executed in this order
- **dependsOn**: the `order` of the single task that must finish first, or null
- **estimatedDays**: whole days of effort, at least 1

## Rules
- Orders are unique and consecutive starting at 1
- A task may only depend on an earlier task, never on itself
- Keep titles under 60 characters
- Prefer several small tasks over one large one; split anything over 10 days

## Output
Call `import_plan` with `{"goal": <the goal text>, "tasks": [...]}`. Then call
`timeline` with the returned plan ID and summarise the schedule for the user."#
            .to_string(),
        arguments: vec![
            PromptTemplateArg {
                name: "goal".to_string(),
                description: "The goal to break down into tasks".to_string(),
                required: true,
            },
            PromptTemplateArg {
                name: "max_tasks".to_string(),
                description: "Upper bound on the number of tasks".to_string(),
                required: false,
            },
        ],
    }]
}
