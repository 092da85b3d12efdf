//! Callback interface and the sync/async execution wrappers.

use crate::codegen::go::{GoWriter, Imports, unused_name};
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::source::MethodDecl;
use crate::spec::RequestSpec;

/// Rejects specs whose async wrapper would have nothing to run.
///
/// ## Errors
/// - [`GeneratorError::AsyncWithoutSync`] if ASYNC is declared without SYNC.
/// - [`GeneratorError::MissingArgument`] if the async method takes no callback.
pub fn check(spec: &RequestSpec<'_>) -> Result<(), GeneratorError> {
    let Some(method) = spec.async_response.filter(|_| spec.has_async()) else {
        return Ok(());
    };
    if !spec.has_sync() {
        return Err(GeneratorError::AsyncWithoutSync {
            request_type: spec.request_type.clone(),
        });
    }
    if method.first_param().is_none() {
        return Err(GeneratorError::MissingArgument {
            request_type: spec.request_type.clone(),
            method: method.name.clone(),
        });
    }
    Ok(())
}

/// The callback interface named by the ASYNC annotation.
pub fn emit_callback(spec: &RequestSpec<'_>, out: &mut GoWriter) {
    out.line(0, format!("type {} interface {{", spec.callback_type));
    out.line(1, "OnStart()");
    out.line(1, "OnError(reason string)");
    out.line(1, format!("OnSuccess(response {})", spec.response_type));
    out.line(0, "}");
}

/// Blocking execution: build, send, release the body, decode.
pub fn emit_sync(
    spec: &RequestSpec<'_>,
    method: &MethodDecl,
    config: &GeneratorConfig,
    out: &mut GoWriter,
) {
    let runtime = config.runtime_package();
    out.line(
        0,
        format!(
            "func (b *{}) {}() ({}, error) {{",
            spec.impl_type(),
            method.name,
            spec.response_type
        ),
    );
    // Zero value returned alongside early errors.
    out.line(1, format!("var empty {}", spec.response_type));
    out.line(1, "req, err := b.build()");
    bail(out);
    out.line(1, "if b.client.Debug() {");
    out.line(2, format!("{runtime}.DebugRequest(req)"));
    out.line(1, "}");
    out.line(1, "response, err := b.client.HttpClient().Do(req)");
    bail(out);
    // Released on every path from here, decode failures included.
    out.line(1, "defer response.Body.Close()");
    out.line(1, "if b.client.Debug() {");
    out.line(2, format!("{runtime}.DebugResponse(response)"));
    out.line(1, "}");
    out.line(1, format!("return New{}(response.Body)", spec.response_type));
    out.line(0, "}");
}

fn bail(out: &mut GoWriter) {
    out.line(1, "if err != nil {");
    out.line(2, "return empty, err");
    out.line(1, "}");
}

/// Fire-and-forget execution reporting through the callback.
///
/// The receiver and the goroutine's locals are renamed when the async method
/// declares parameters with the same names.
///
/// ## Errors
/// Returns [`GeneratorError::MissingArgument`] if the async method has no
/// callback parameter; [`check`] reports this earlier.
pub fn emit_async(
    spec: &RequestSpec<'_>,
    method: &MethodDecl,
    sync: &MethodDecl,
    out: &mut GoWriter,
) -> Result<(), GeneratorError> {
    let callback = &method
        .first_param()
        .ok_or_else(|| GeneratorError::MissingArgument {
            request_type: spec.request_type.clone(),
            method: method.name.clone(),
        })?
        .name;

    let taken: Vec<&str> = method.params.iter().map(|p| p.name.as_str()).collect();
    let receiver = unused_name("b", &taken);
    let response = unused_name("response", &taken);
    let err = unused_name("err", &taken);

    out.line(
        0,
        format!(
            "func ({receiver} *{}) {}({}) {{",
            spec.impl_type(),
            method.name,
            method.params_list()
        ),
    );
    out.line(1, format!("if {callback} != nil {{"));
    out.line(2, format!("{callback}.OnStart()"));
    out.line(1, "}");
    out.line(1, format!("go func({receiver} *{}) {{", spec.impl_type()));
    out.line(2, format!("{response}, {err} := {receiver}.{}()", sync.name));
    out.line(2, format!("if {callback} == nil {{"));
    out.line(3, "return");
    out.line(2, "}");
    // Exactly one completion callback per call.
    out.line(2, format!("if {err} != nil {{"));
    out.line(3, format!("{callback}.OnError({err}.Error())"));
    out.line(2, "} else {");
    out.line(3, format!("{callback}.OnSuccess({response})"));
    out.line(2, "}");
    out.line(1, format!("}}({receiver})"));
    out.line(0, "}");
    Ok(())
}

/// Emits the wrappers the spec asks for, each preceded by a blank line.
pub fn emit_wrappers(
    spec: &RequestSpec<'_>,
    config: &GeneratorConfig,
    imports: &mut Imports,
    out: &mut GoWriter,
) -> Result<(), GeneratorError> {
    check(spec)?;

    let Some(sync) = spec.sync_response.filter(|_| spec.has_sync()) else {
        return Ok(());
    };
    imports.runtime(&config.runtime_import);
    out.blank();
    emit_sync(spec, sync, config, out);

    if let Some(method) = spec.async_response.filter(|_| spec.has_async()) {
        out.blank();
        emit_async(spec, method, sync, out)?;
    }
    Ok(())
}
