//! `no-duplicate-case`: a `case` whose test repeats an earlier test of the
//! same switch can never be reached.

use crate::config::parse_options;
use crate::context::{Report, RuleContext};
use crate::error::ConfigError;
use crate::rule::{Rule, RuleMeta, RuleResult, Subscription};
use crate::rules::NoOptions;
use serde_json::Value;
use smallvec::SmallVec;
use tsl_syntax::utilities::is_token_equal;
use tsl_syntax::{NodeIndex, SyntaxKind};

pub const NAME: &str = "no-duplicate-case";

static META: RuleMeta = RuleMeta {
    name: NAME,
    description: "Disallow duplicate case labels",
    requires_type_info: false,
    messages: &[("unexpected", "Duplicate case label.")],
};

pub struct NoDuplicateCase;

pub fn create(options: &Value) -> Result<Box<dyn Rule>, ConfigError> {
    let NoOptions {} = parse_options(NAME, options)?;
    Ok(Box::new(NoDuplicateCase))
}

impl Rule for NoDuplicateCase {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscription(&self) -> Subscription {
        Subscription::Kinds(&[SyntaxKind::SwitchStatement])
    }

    fn check(&self, ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
        let arena = ctx.arena();
        let file = ctx.file();
        let Some(clauses) = arena
            .get(node)
            .and_then(|n| arena.get_switch(n))
            .and_then(|s| arena.get(s.case_block))
            .and_then(|b| arena.get_block(b))
        else {
            return Ok(());
        };

        let mut previous_tests: SmallVec<[NodeIndex; 8]> = SmallVec::new();
        for &clause in clauses.statements.iter() {
            let Some(test) = arena
                .get(clause)
                .and_then(|c| arena.get_case_clause(c))
                .and_then(|c| c.expression.into_option())
            else {
                continue;
            };
            if previous_tests
                .iter()
                .any(|&earlier| is_token_equal(file, earlier, test))
            {
                ctx.report(Report::new("unexpected", ctx.range(clause)));
            } else {
                previous_tests.push(test);
            }
        }
        Ok(())
    }
}
