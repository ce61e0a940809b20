//! `prefer-ts-expect-error`: `@ts-ignore` suppresses silently even when
//! nothing is wrong; `@ts-expect-error` fails once the error is gone.

use crate::config::parse_options;
use crate::context::{Report, RuleContext};
use crate::error::ConfigError;
use crate::rule::{Rule, RuleMeta, RuleResult, RuleVisitor, Subscription};
use crate::rules::NoOptions;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use serde_json::Value;
use tsl_common::CommentRange;
use tsl_syntax::NodeIndex;

pub const NAME: &str = "prefer-ts-expect-error";

static META: RuleMeta = RuleMeta {
    name: NAME,
    description: "Enforce using `@ts-expect-error` over `@ts-ignore`",
    requires_type_info: false,
    messages: &[(
        "preferExpectErrorComment",
        "Use \"@ts-expect-error\" to ensure an error is actually being suppressed.",
    )],
};

static TS_IGNORE_SINGLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*/?\s*@ts-ignore").expect("valid regex"));
static TS_IGNORE_MULTI_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:/|\*)*\s*@ts-ignore").expect("valid regex"));

pub struct PreferTsExpectError;

pub fn create(options: &Value) -> Result<Box<dyn Rule>, ConfigError> {
    let NoOptions {} = parse_options(NAME, options)?;
    Ok(Box::new(PreferTsExpectError))
}

impl Rule for PreferTsExpectError {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn subscription(&self) -> Subscription {
        Subscription::AllNodes
    }

    fn visitor(&self) -> Box<dyn RuleVisitor + '_> {
        Box::new(CommentVisitor::default())
    }
}

/// Leading trivia is shared between a statement and its first token, so
/// comments already looked at are remembered for the rest of the file.
#[derive(Default)]
struct CommentVisitor {
    seen: FxHashSet<u32>,
}

impl RuleVisitor for CommentVisitor {
    fn visit(&mut self, ctx: &mut RuleContext<'_>, node: NodeIndex) -> RuleResult {
        let file = ctx.file();
        for comment in file.leading_comments(node) {
            if !self.seen.insert(comment.pos) || !is_ts_ignore(comment, file.text()) {
                continue;
            }
            let body = comment.get_body(file.text());
            let rewritten = body.replacen("@ts-ignore", "@ts-expect-error", 1);
            let replacement = if comment.is_multi_line {
                format!("/*{rewritten}*/")
            } else {
                format!("//{rewritten}")
            };
            let fixer = ctx.fixer();
            let fix = fixer.fix(
                "Replace \"@ts-ignore\" with \"@ts-expect-error\"",
                vec![fixer.replace_range(comment.pos, comment.end, replacement)],
            );
            ctx.report(
                Report::new("preferExpectErrorComment", (comment.pos, comment.end)).fix(fix),
            );
        }
        Ok(())
    }
}

/// A block comment counts when its last line carries the directive, which
/// is where the compiler looks for it.
fn is_ts_ignore(comment: &CommentRange, source: &str) -> bool {
    let body = comment.get_body(source);
    if comment.is_multi_line {
        let last_line = body.rsplit('\n').next().unwrap_or(body);
        TS_IGNORE_MULTI_LINE.is_match(last_line)
    } else {
        TS_IGNORE_SINGLE_LINE.is_match(body)
    }
}
