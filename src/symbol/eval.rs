//! The attempt evaluator.
//!
//! One recursive function of (grammar, cursor position): each node kind
//! opens nested attempts where its semantics demand atomicity, commits on
//! success, and lets the RAII guard roll back on every failure path.
//! Failures travel as `Result` values, never as unwinding.

use crate::cursor::Cursor;
use crate::elem::Elem;
use crate::errors::{Fail, TryResult};
use crate::value::Value;

use super::node::{Kind, LiteralOut, Node, Step};
use super::{Grammar, SymbolId};

impl<E: Elem> Grammar<E> {
    pub(crate) fn eval(&self, id: SymbolId, cur: &mut Cursor<E>) -> TryResult<Step> {
        let node = self.node(id);
        match &node.kind {
            Kind::Terminal {
                test,
                escape,
                capture,
            } => {
                let first = cur.next()?;
                let matched = match escape {
                    Some(esc) if first == *esc => cur.next()?,
                    _ => {
                        if !test.accepts(first) {
                            return Err(Fail::TryFailed);
                        }
                        first
                    }
                };
                Ok(if *capture {
                    Step::Emit(self.finish(node, matched.scalar()))
                } else {
                    Step::Skip
                })
            }

            Kind::Literal { text, out } => {
                let mut att = cur.attempt();
                for &expected in text {
                    if att.next()? != expected {
                        return Err(Fail::TryFailed);
                    }
                }
                att.commit();
                Ok(match out {
                    LiteralOut::Ignore => Step::Skip,
                    LiteralOut::Text => {
                        let parts = text.iter().map(|e| e.scalar()).collect();
                        Step::Emit(self.finish(node, E::splice(parts)))
                    }
                    LiteralOut::Fixed(value) => Step::Emit(self.finish(node, value.clone())),
                })
            }

            Kind::Seq { children, ignore } => {
                let mut att = cur.attempt();
                let mut out = Vec::new();
                for &child in children {
                    if let Step::Emit(value) = self.eval(child, &mut att)? {
                        out.push(value);
                    }
                }
                att.commit();
                if *ignore || out.is_empty() {
                    Ok(Step::Skip)
                } else if out.len() == 1 {
                    Ok(Step::Emit(self.finish(node, out.remove(0))))
                } else {
                    Ok(Step::Emit(self.finish(node, Value::Seq(out))))
                }
            }

            Kind::Chain { children } => {
                let mut att = cur.attempt();
                let mut flat = Vec::new();
                for &child in children {
                    if let Step::Emit(value) = self.eval(child, &mut att)? {
                        match value {
                            Value::Seq(items) => flat.extend(items),
                            other => flat.push(other),
                        }
                    }
                }
                att.commit();
                Ok(Step::Emit(self.finish(node, Value::Seq(flat))))
            }

            Kind::ChainConcat { children } => {
                let mut att = cur.attempt();
                let mut parts = Vec::new();
                for &child in children {
                    if let Step::Emit(value) = self.eval(child, &mut att)? {
                        parts.push(value);
                    }
                }
                att.commit();
                Ok(Step::Emit(self.finish(node, E::splice(parts))))
            }

            Kind::Rep {
                child,
                min,
                max,
                concat,
                none,
                ignore,
            } => {
                let mut values = Vec::new();
                let mut count = 0usize;
                loop {
                    if max.is_some_and(|max| count >= max) {
                        break;
                    }
                    let start = cur.pos();
                    let mut att = cur.attempt();
                    match self.eval(*child, &mut att) {
                        Ok(step) => {
                            att.commit();
                            count += 1;
                            if let Step::Emit(value) = step {
                                values.push(value);
                            }
                            // A zero-width match would repeat forever; stop
                            // after the first.
                            if cur.pos() == start {
                                break;
                            }
                        }
                        Err(_) => break,
                    }
                }
                if min.is_some_and(|min| count < min) {
                    return Err(Fail::TryFailed);
                }
                if *ignore {
                    return Ok(Step::Skip);
                }
                if let Some(sentinel) = none {
                    return Ok(Step::Emit(match values.pop() {
                        Some(value) => self.finish(node, value),
                        None => sentinel.clone(),
                    }));
                }
                Ok(Step::Emit(if *concat {
                    self.finish(node, E::splice(values))
                } else {
                    self.finish(node, Value::Seq(values))
                }))
            }

            Kind::Or { alts } => {
                for &alt in alts {
                    let mut att = cur.attempt();
                    match self.eval(alt, &mut att) {
                        Ok(step) => {
                            att.commit();
                            return Ok(match step {
                                Step::Emit(value) => Step::Emit(self.finish(node, value)),
                                Step::Skip => Step::Skip,
                            });
                        }
                        Err(_) => continue,
                    }
                }
                Err(Fail::TryFailed)
            }

            Kind::Except { base, excluded } => {
                {
                    let mut look = cur.attempt();
                    if self.eval(*excluded, &mut look).is_ok() {
                        return Err(Fail::TryFailed);
                    }
                }
                match self.eval(*base, cur)? {
                    Step::Emit(value) => Ok(Step::Emit(self.finish(node, value))),
                    Step::Skip => Ok(Step::Skip),
                }
            }
        }
    }

    fn finish(&self, node: &Node<E>, value: Value) -> Value {
        match &node.maker {
            Some(maker) => maker(value),
            None => value,
        }
    }
}
