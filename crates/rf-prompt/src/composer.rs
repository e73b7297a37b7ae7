//! Prompt composer: rule input -> bounded-format prompts.

use crate::error::{PromptError, PromptResult};
use crate::templates;
use minijinja::{context, Environment};
use rf_core::metadata::describe_table;
use rf_core::rule::{RuleInput, SqlMode};

/// Builds the test-case prompt and the mode-appropriate SQL prompt for a
/// rule input.
///
/// Templates are registered once at construction; composition is a pure
/// transformation with no side effects.
pub struct PromptComposer {
    env: Environment<'static>,
}

impl PromptComposer {
    /// Create a composer with all templates registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        // Template sources are embedded consts; registration cannot fail.
        env.add_template(templates::TEST_CASE, templates::TEST_CASE_TEMPLATE)
            .expect("embedded test_case template is valid");
        env.add_template(templates::SQL_SIMPLE, templates::SQL_SIMPLE_TEMPLATE)
            .expect("embedded sql_simple template is valid");
        env.add_template(templates::SQL_JOIN, templates::SQL_JOIN_TEMPLATE)
            .expect("embedded sql_join template is valid");

        Self { env }
    }

    /// Compose the test-case prompt.
    ///
    /// Independent of the simple-vs-join branch: always embeds field and
    /// rule text.
    pub fn compose_test_case(&self, rule: &RuleInput) -> PromptResult<String> {
        check_rule(rule)?;

        let template = self.env.get_template(templates::TEST_CASE)?;
        let prompt = template.render(context! {
            table => rule.table,
            field => rule.field,
            rule => rule.rule,
            schema_block => schema_block(rule),
        })?;
        Ok(prompt)
    }

    /// Compose the SQL prompt, branching once on the rule's SQL mode.
    ///
    /// Join mode embeds the join condition verbatim and instructs explicit
    /// JOIN with full `table.column` notation; simple mode forbids JOIN.
    pub fn compose_sql(&self, rule: &RuleInput) -> PromptResult<String> {
        check_rule(rule)?;

        let prompt = match rule.sql_mode() {
            SqlMode::Simple => {
                let template = self.env.get_template(templates::SQL_SIMPLE)?;
                template.render(context! {
                    table => rule.table,
                    field => rule.field,
                    rule => rule.rule,
                    schema_block => schema_block(rule),
                })?
            }
            SqlMode::Joined(condition) => {
                let template = self.env.get_template(templates::SQL_JOIN)?;
                template.render(context! {
                    table => rule.table,
                    field => rule.field,
                    rule => rule.rule,
                    join_condition => condition,
                    schema_block => schema_block(rule),
                })?
            }
        };
        Ok(prompt)
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}

fn check_rule(rule: &RuleInput) -> PromptResult<()> {
    rule.validate().map_err(|e| PromptError::InvalidRuleInput {
        reason: e.to_string(),
    })
}

/// Render the rule's table metadata as a schema block, verbatim per table.
///
/// Empty string when no metadata was supplied; the template omits the
/// schema section entirely in that case.
fn schema_block(rule: &RuleInput) -> String {
    rule.metadata
        .iter()
        .map(|(table, columns)| describe_table(table, columns))
        .collect::<Vec<_>>()
        .join("\n")
}
