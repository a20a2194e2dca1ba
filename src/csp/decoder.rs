//! Schema decoders
//!
//! Decoding walks the flat token array with a cursor. Every decoder takes
//! the index of its node and returns the value together with the number of
//! tokens the node covers, children included. Objects are read entry by
//! entry in document order, so the first violation in the text is the one
//! reported.
//!
//! The schema is closed: an object with an unexpected field count, an
//! unknown key or a repeated key is rejected.

use crate::config::CodecConfig;
use crate::errors::{CjError, CjErrorCode, CjResult};
use crate::observability::{log_error, log_event_with_fields, Event, Logger, Severity};
use crate::token::{token_at, tokenize_with, Token, TokenKind};
use crate::tuples::{decode_tokens, IntTuples, FLAT};

use super::types::{Constraint, ConstraintDef, Csp, Domain, Meta};

/// Decode a CSP instance with the default configuration
pub fn decode(text: &str) -> CjResult<Csp> {
    decode_with(text, &CodecConfig::default())
}

/// Decode a CSP instance
///
/// # Errors
///
/// - Lexical codes when the text is not well-formed JSON
/// - `CJ_ERROR_ARG` when the text holds no JSON value at all
/// - A schema code naming the first violation in document order
/// - `CJ_ERROR_TRAILING_CONTENT` when more values follow the instance
pub fn decode_with(text: &str, config: &CodecConfig) -> CjResult<Csp> {
    let logger = config.logger();
    let result = decode_document(text, config, &logger, |d| d.csp(0));

    match &result {
        Ok(csp) => log_event_with_fields(
            &logger,
            Event::DecodeComplete,
            &[
                ("domains", &csp.domains.len().to_string()),
                ("vars", &csp.vars.len().to_string()),
                ("constraint_defs", &csp.constraint_defs.len().to_string()),
                ("constraints", &csp.constraints.len().to_string()),
            ],
        ),
        Err(e) => log_error(&logger, Event::DecodeFailed, e),
    }

    result
}

/// Decode a single domain such as `{"values": [0, 1]}`
pub fn decode_domain(text: &str) -> CjResult<Domain> {
    let config = CodecConfig::default();
    decode_document(text, &config, &config.logger(), |d| d.domain(0, "domain"))
}

/// Decode a single constraint definition such as `{"noGoods": [[0, 0]]}`
pub fn decode_constraint_def(text: &str) -> CjResult<ConstraintDef> {
    let config = CodecConfig::default();
    decode_document(text, &config, &config.logger(), |d| {
        d.constraint_def(0, "constraintDef")
    })
}

fn decode_document<T, F>(
    text: &str,
    config: &CodecConfig,
    logger: &Logger,
    decode: F,
) -> CjResult<T>
where
    F: FnOnce(&Decoder<'_>) -> CjResult<(T, usize)>,
{
    let src = text.as_bytes();
    let tokens = tokenize_with(src, config, logger)?;
    if tokens.is_empty() {
        return Err(CjError::arg("Empty document"));
    }

    let decoder = Decoder {
        src,
        tokens: &tokens,
        logger,
    };
    let (value, consumed) = decode(&decoder)?;

    if consumed < tokens.len() {
        return Err(CjError::new(
            CjErrorCode::TrailingContent,
            format!(
                "{} tokens after the value, starting at byte {}",
                tokens.len() - consumed,
                tokens[consumed].start
            ),
        ));
    }
    Ok(value)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn unknown(code: CjErrorCode, path: &str, key: &[u8]) -> CjError {
    CjError::at(code, path, format!("Unknown field \"{}\"", lossy(key)))
}

/// Cursor-based decoder over one token array
struct Decoder<'a> {
    src: &'a [u8],
    tokens: &'a [Token],
    logger: &'a Logger,
}

impl<'a> Decoder<'a> {
    /// Token at `index`, traced under `path`
    fn token(&self, index: usize, path: &str) -> CjResult<&'a Token> {
        let tok = token_at(self.tokens, index).map_err(|e| e.or_at(path))?;

        if self.logger.enabled(Severity::Trace) {
            log_event_with_fields(
                self.logger,
                Event::Token,
                &[
                    ("path", path),
                    ("kind", tok.kind.name()),
                    ("start", &tok.start.to_string()),
                    ("end", &tok.end.to_string()),
                    ("size", &tok.size.to_string()),
                    ("text", &lossy(tok.raw(self.src))),
                ],
            );
        }
        Ok(tok)
    }

    /// Token at `index`, required to be of `kind`
    fn expect(
        &self,
        index: usize,
        path: &str,
        kind: TokenKind,
        code: CjErrorCode,
    ) -> CjResult<&'a Token> {
        let tok = self.token(index, path)?;
        if tok.kind != kind {
            return Err(CjError::at(
                code,
                path,
                format!("Expected {}, found {}", kind, tok.kind),
            ));
        }
        Ok(tok)
    }

    /// Walk the entries of the object at `cursor`
    ///
    /// The object must have exactly `expected` entries, each keyed by a
    /// string. `field` receives each key and the index of its value and
    /// returns the value's token count.
    fn fields<F>(
        &self,
        cursor: usize,
        path: &str,
        expected: usize,
        bad_count: CjErrorCode,
        bad_key: CjErrorCode,
        mut field: F,
    ) -> CjResult<usize>
    where
        F: FnMut(&'a [u8], usize) -> CjResult<usize>,
    {
        let obj = self.token(cursor, path)?;
        if obj.size != expected {
            return Err(CjError::at(
                bad_count,
                path,
                format!("Expected {} fields, found {}", expected, obj.size),
            ));
        }

        let mut seen: Vec<&[u8]> = Vec::with_capacity(expected);
        let mut idx = cursor + 1;
        for _ in 0..obj.size {
            let key_tok = self.token(idx, path)?;
            let key = key_tok.text(self.src);
            // Lenient input may key an entry with a bare primitive
            if !key_tok.is_str() {
                return Err(CjError::at(
                    bad_key,
                    path,
                    format!("Expected a string key, found {} {}", key_tok.kind, lossy(key)),
                ));
            }
            if seen.contains(&key) {
                return Err(CjError::at(
                    CjErrorCode::DuplicateField,
                    path,
                    format!("Duplicate field \"{}\"", lossy(key)),
                ));
            }
            seen.push(key);

            let consumed = field(key, idx + 1)?;
            idx += 1 + consumed;
        }

        Ok(idx - cursor)
    }

    /// Token count of the arbitrary value at `cursor`
    fn consume_any(&self, cursor: usize, path: &str) -> CjResult<usize> {
        let mut pending = 1usize;
        let mut idx = cursor;
        while pending > 0 {
            let tok = self.token(idx, path)?;
            pending -= 1;
            pending += match tok.kind {
                TokenKind::Object => tok.size.saturating_mul(2),
                TokenKind::Array => tok.size,
                TokenKind::String | TokenKind::Primitive => 0,
            };
            idx += 1;
        }
        Ok(idx - cursor)
    }

    fn string(&self, index: usize, path: &str, code: CjErrorCode) -> CjResult<String> {
        let tok = self.expect(index, path, TokenKind::String, code)?;
        Ok(lossy(tok.text(self.src)))
    }

    /// Tuples at `index`, which must be an array
    fn tuples(
        &self,
        index: usize,
        path: &str,
        default_arity: i32,
        not_array: CjErrorCode,
    ) -> CjResult<(IntTuples, usize)> {
        self.expect(index, path, TokenKind::Array, not_array)?;
        decode_tokens(self.src, self.tokens, index, default_arity).map_err(|e| e.or_at(path))
    }

    /// Flat tuples at `index`
    fn flat_tuples(
        &self,
        index: usize,
        path: &str,
        not_array: CjErrorCode,
        not_flat: CjErrorCode,
    ) -> CjResult<(IntTuples, usize)> {
        let (tuples, consumed) = self.tuples(index, path, FLAT, not_array)?;
        if !tuples.is_flat() {
            return Err(CjError::at(
                not_flat,
                path,
                format!("Expected a list of integers, found tuples of arity {}", tuples.arity),
            ));
        }
        Ok((tuples, consumed))
    }

    fn csp(&self, cursor: usize) -> CjResult<(Csp, usize)> {
        const PATH: &str = "$";
        self.expect(cursor, PATH, TokenKind::Object, CjErrorCode::CspJsonIsNotObject)?;

        let mut meta = None;
        let mut domains = None;
        let mut vars = None;
        let mut constraint_defs = None;
        let mut constraints = None;

        let consumed = self.fields(
            cursor,
            PATH,
            5,
            CjErrorCode::CspJsonBadFieldCount,
            CjErrorCode::CspJsonUnknownField,
            |key, at| {
                match key {
                    b"meta" => {
                        let (value, n) = self.meta(at)?;
                        meta = Some(value);
                        Ok(n)
                    }
                    b"domains" => {
                        let (value, n) = self.domains(at)?;
                        domains = Some(value);
                        Ok(n)
                    }
                    b"vars" => {
                        let (value, n) = self.flat_tuples(
                            at,
                            "vars",
                            CjErrorCode::VarsIsNotArray,
                            CjErrorCode::VarIsNotInt,
                        )?;
                        vars = Some(value);
                        Ok(n)
                    }
                    b"constraintDefs" => {
                        let (value, n) = self.constraint_defs(at)?;
                        constraint_defs = Some(value);
                        Ok(n)
                    }
                    b"constraints" => {
                        let (value, n) = self.constraints(at)?;
                        constraints = Some(value);
                        Ok(n)
                    }
                    _ => Err(unknown(CjErrorCode::CspJsonUnknownField, PATH, key)),
                }
            },
        )?;

        let missing = |name: &str| {
            CjError::at(
                CjErrorCode::CspJsonBadFieldCount,
                PATH,
                format!("Missing field \"{}\"", name),
            )
        };

        let csp = Csp {
            meta: meta.ok_or_else(|| missing("meta"))?,
            domains: domains.ok_or_else(|| missing("domains"))?,
            vars: vars.ok_or_else(|| missing("vars"))?,
            constraint_defs: constraint_defs.ok_or_else(|| missing("constraintDefs"))?,
            constraints: constraints.ok_or_else(|| missing("constraints"))?,
        };
        Ok((csp, consumed))
    }

    fn meta(&self, cursor: usize) -> CjResult<(Meta, usize)> {
        const PATH: &str = "meta";
        self.expect(cursor, PATH, TokenKind::Object, CjErrorCode::MetaIsNotObject)?;

        let mut id = None;
        let mut algo = None;
        let mut params_json = None;

        let consumed = self.fields(
            cursor,
            PATH,
            3,
            CjErrorCode::MetaBadFieldCount,
            CjErrorCode::MetaUnknownField,
            |key, at| {
                match key {
                    b"id" => {
                        id = Some(self.string(at, "meta.id", CjErrorCode::MetaIdNotString)?);
                        Ok(1)
                    }
                    b"algo" => {
                        algo = Some(self.string(at, "meta.algo", CjErrorCode::MetaAlgoNotString)?);
                        Ok(1)
                    }
                    b"params" => {
                        let n = self.consume_any(at, "meta.params")?;
                        params_json = Some(lossy(self.tokens[at].raw(self.src)));
                        Ok(n)
                    }
                    _ => Err(unknown(CjErrorCode::MetaUnknownField, PATH, key)),
                }
            },
        )?;

        let missing = |name: &str| {
            CjError::at(
                CjErrorCode::MetaBadFieldCount,
                PATH,
                format!("Missing field \"{}\"", name),
            )
        };

        let meta = Meta {
            id: id.ok_or_else(|| missing("id"))?,
            algo: algo.ok_or_else(|| missing("algo"))?,
            params_json: params_json.ok_or_else(|| missing("params"))?,
        };
        Ok((meta, consumed))
    }

    fn domains(&self, cursor: usize) -> CjResult<(Vec<Domain>, usize)> {
        let arr = self.expect(
            cursor,
            "domains",
            TokenKind::Array,
            CjErrorCode::DomainsIsNotArray,
        )?;

        let mut domains = Vec::with_capacity(arr.size);
        let mut idx = cursor + 1;
        for i in 0..arr.size {
            let (domain, n) = self.domain(idx, &format!("domains[{}]", i))?;
            domains.push(domain);
            idx += n;
        }
        Ok((domains, idx - cursor))
    }

    fn domain(&self, cursor: usize, path: &str) -> CjResult<(Domain, usize)> {
        self.expect(cursor, path, TokenKind::Object, CjErrorCode::DomainIsNotObject)?;

        let mut domain = None;
        let consumed = self.fields(
            cursor,
            path,
            1,
            CjErrorCode::DomainBadFieldCount,
            CjErrorCode::DomainUnknownType,
            |key, at| {
                match key {
                    b"values" => {
                        let (values, n) = self.flat_tuples(
                            at,
                            &format!("{}.values", path),
                            CjErrorCode::DomainValuesIsNotArray,
                            CjErrorCode::DomainValuesIsNotInt,
                        )?;
                        domain = Some(Domain::Values(values));
                        Ok(n)
                    }
                    _ => Err(unknown(CjErrorCode::DomainUnknownType, path, key)),
                }
            },
        )?;

        let domain = domain.ok_or_else(|| {
            CjError::at(CjErrorCode::DomainUnknownType, path, "No domain encoding")
        })?;
        Ok((domain, consumed))
    }

    fn constraint_defs(&self, cursor: usize) -> CjResult<(Vec<ConstraintDef>, usize)> {
        let arr = self.expect(
            cursor,
            "constraintDefs",
            TokenKind::Array,
            CjErrorCode::ConstraintDefsIsNotArray,
        )?;

        let mut defs = Vec::with_capacity(arr.size);
        let mut idx = cursor + 1;
        for i in 0..arr.size {
            let (def, n) = self.constraint_def(idx, &format!("constraintDefs[{}]", i))?;
            defs.push(def);
            idx += n;
        }
        Ok((defs, idx - cursor))
    }

    fn constraint_def(&self, cursor: usize, path: &str) -> CjResult<(ConstraintDef, usize)> {
        self.expect(
            cursor,
            path,
            TokenKind::Object,
            CjErrorCode::ConstraintDefIsNotObject,
        )?;

        let mut def = None;
        let consumed = self.fields(
            cursor,
            path,
            1,
            CjErrorCode::ConstraintDefBadFieldCount,
            CjErrorCode::ConstraintDefUnknownType,
            |key, at| match key {
                b"noGoods" => {
                    let p = format!("{}.noGoods", path);
                    // An empty list means zero-width nogoods
                    let (no_goods, n) = self.tuples(at, &p, 0, CjErrorCode::NoGoodsIsNotArray)?;
                    if no_goods.is_flat() {
                        return Err(CjError::at(
                            CjErrorCode::NoGoodsArrayHasNotATuple,
                            p,
                            "Expected a list of tuples, found a list of integers",
                        ));
                    }
                    def = Some(ConstraintDef::NoGoods(no_goods));
                    Ok(n)
                }
                _ => Err(unknown(CjErrorCode::ConstraintDefUnknownType, path, key)),
            },
        )?;

        let def = def.ok_or_else(|| {
            CjError::at(
                CjErrorCode::ConstraintDefUnknownType,
                path,
                "No constraint definition encoding",
            )
        })?;
        Ok((def, consumed))
    }

    fn constraints(&self, cursor: usize) -> CjResult<(Vec<Constraint>, usize)> {
        let arr = self.expect(
            cursor,
            "constraints",
            TokenKind::Array,
            CjErrorCode::ConstraintsIsNotArray,
        )?;

        let mut constraints = Vec::with_capacity(arr.size);
        let mut idx = cursor + 1;
        for i in 0..arr.size {
            let (constraint, n) = self.constraint(idx, &format!("constraints[{}]", i))?;
            constraints.push(constraint);
            idx += n;
        }
        Ok((constraints, idx - cursor))
    }

    fn constraint(&self, cursor: usize, path: &str) -> CjResult<(Constraint, usize)> {
        self.expect(
            cursor,
            path,
            TokenKind::Object,
            CjErrorCode::ConstraintIsNotObject,
        )?;

        let mut id = None;
        let mut vars = None;

        let consumed = self.fields(
            cursor,
            path,
            2,
            CjErrorCode::ConstraintBadFieldCount,
            CjErrorCode::ConstraintUnknownField,
            |key, at| match key {
                b"id" => {
                    let p = format!("{}.id", path);
                    let tok = self.token(at, &p)?;
                    let value = tok.as_i32(self.src).ok_or_else(|| {
                        CjError::at(
                            CjErrorCode::ConstraintIdIsNotInt,
                            &p,
                            format!("Expected a 32-bit integer, found {}", lossy(tok.raw(self.src))),
                        )
                    })?;
                    id = Some(value);
                    Ok(1)
                }
                b"vars" => {
                    let (value, n) = self.flat_tuples(
                        at,
                        &format!("{}.vars", path),
                        CjErrorCode::ConstraintVarsIsNotArray,
                        CjErrorCode::ConstraintVarIsNotInt,
                    )?;
                    vars = Some(value);
                    Ok(n)
                }
                _ => Err(unknown(CjErrorCode::ConstraintUnknownField, path, key)),
            },
        )?;

        let missing = |name: &str| {
            CjError::at(
                CjErrorCode::ConstraintBadFieldCount,
                path,
                format!("Missing field \"{}\"", name),
            )
        };

        let constraint = Constraint {
            id: id.ok_or_else(|| missing("id"))?,
            vars: vars.ok_or_else(|| missing("vars"))?,
        };
        Ok((constraint, consumed))
    }
}
