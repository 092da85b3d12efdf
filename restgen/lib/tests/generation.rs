//! End-to-end generation from Go source.

use restgen_lib::{
    GeneratorConfig, GeneratorError, HttpMethod, Verbatim, generate_source, parse_go_source, walk,
};

const PHOTOS: &str = include_str!("fixtures/photos.go");
const DELETE_PHOTO: &str = include_str!("fixtures/delete_photo.go");
const DELETE_PHOTO_EXPECTED: &str = include_str!("fixtures/delete_photo.expected");

fn generate(source: &str) -> String {
    generate_source(source, &GeneratorConfig::default(), &Verbatim).unwrap()
}

/// Text of the Go function starting at `signature`, up to its closing brace.
fn function<'a>(code: &'a str, signature: &str) -> &'a str {
    let start = code
        .find(signature)
        .unwrap_or_else(|| panic!("missing `{signature}` in:\n{code}"));
    let rest = &code[start..];
    let end = rest.find("\n}\n").map(|i| i + 3).unwrap_or(rest.len());
    &rest[..end]
}

#[test]
fn delete_builder_matches_expected_file() {
    assert_eq!(generate(DELETE_PHOTO), DELETE_PHOTO_EXPECTED);
}

#[test]
fn generation_is_deterministic() {
    assert_eq!(generate(PHOTOS), generate(PHOTOS));
}

#[test]
fn one_builder_per_annotated_interface() {
    let unit = parse_go_source(PHOTOS).unwrap();
    let parsed = walk(&unit);

    let specs: Vec<_> = parsed
        .specs
        .iter()
        .map(|s| (s.request_type.as_str(), s.http_method, s.api_endpoint.as_str()))
        .collect();
    assert_eq!(
        specs,
        vec![
            ("GetPhoto", HttpMethod::Get, "/photos/{id}"),
            ("UploadPhoto", HttpMethod::Post, "/albums/{album}/photos"),
            ("DeletePhoto", HttpMethod::Delete, "/photos/{id}"),
        ]
    );

    let code = generate(PHOTOS);
    assert!(!code.contains("type ListerImpl"));
    assert!(!code.contains("type PhotoImpl"));
}

#[test]
fn get_scenario_setters_and_query_assembly() {
    let code = generate(PHOTOS);

    assert!(code.contains(
        "func (b *GetPhotoImpl) PhotoID(id string) GetPhoto {\n\tb.pathSubstitutions[\"id\"] = id\n\treturn b\n}"
    ));
    assert!(code.contains(
        "func (b *GetPhotoImpl) ImageSize(size int) GetPhoto {\n\tb.queryParams.Add(\"image_size\", fmt.Sprintf(\"%v\", size))\n\treturn b\n}"
    ));
    assert!(!code.contains(") Comment("));

    let build = function(&code, "func (b *GetPhotoImpl) build()");
    assert!(build.contains("http.NewRequest(\"GET\", endpoint, nil)"));
    assert!(build.contains("req.URL.RawQuery = b.queryParams.Encode()"));
    assert!(!build.contains("contentType"));

    let run = function(&code, "func (b *GetPhotoImpl) Run() (PhotoResponse, error) {");
    assert!(run.contains("defer response.Body.Close()"));
    assert!(run.contains("return NewPhotoResponse(response.Body)"));
}

#[test]
fn async_scenario_emits_callback_and_goroutine() {
    let code = generate(PHOTOS);

    assert!(code.contains(
        "type PhotoCallback interface {\n\tOnStart()\n\tOnError(reason string)\n\tOnSuccess(response PhotoResponse)\n}"
    ));
    let run_async = function(&code, "func (b *GetPhotoImpl) RunAsync(callback PhotoCallback) {");
    assert!(run_async.contains("go func(b *GetPhotoImpl) {"));
    assert!(run_async.contains("response, err := b.Run()"));
    assert_eq!(run_async.matches("callback.OnError(").count(), 1);
    assert_eq!(run_async.matches("callback.OnSuccess(").count(), 1);
}

#[test]
fn post_form_negotiates_body_in_precedence_order() {
    let code = generate(PHOTOS);

    assert!(code.contains("b.pathSubstitutions[\"album\"] = fmt.Sprintf(\"%v\", album)"));
    assert!(code.contains("b.postFormParams.Add(\"title\", title)"));
    assert!(code.contains("b.postMultiPartParams[\"data\"] = data"));
    assert!(code.contains("b.headerParams[\"Authorization\"] = token"));

    let build = function(&code, "func (b *UploadPhotoImpl) build()");
    let json = build.find("if b.postBody != nil {").unwrap();
    let form = build.find("} else if len(b.postFormParams) > 0 {").unwrap();
    let multipart = build.find("} else if len(b.postMultiPartParams) > 0 {").unwrap();
    assert!(json < form && form < multipart);
    assert!(build.contains("http.NewRequest(\"POST\", endpoint, body)"));
    assert!(!build.contains("RawQuery"));
}

#[test]
fn imports_cover_every_emitted_fragment() {
    let code = generate(PHOTOS);
    assert!(code.contains(
        "import (\n\t\"bytes\"\n\t\"encoding/json\"\n\t\"fmt\"\n\t\"io\"\n\t\"mime/multipart\"\n\t\"net/http\"\n\t\"net/url\"\n\t\"strings\"\n\n\t\"restgen/restclient\"\n)\n"
    ));
}

#[test]
fn runtime_import_is_configurable() {
    let config = GeneratorConfig::default().with_runtime_import("github.com/acme/api/transport");
    let code = generate_source(DELETE_PHOTO, &config, &Verbatim).unwrap();

    assert!(code.contains("\t\"github.com/acme/api/transport\"\n"));
    assert!(code.contains("func NewDeletePhoto(client transport.Client) DeletePhoto {"));
    assert!(!code.contains("restclient"));
}

#[test]
fn duplicate_path_annotation_keeps_the_later_setter() {
    let source = r#"package p

// @GET("/items/{id}")
type GetItem interface {
	// @PATH("id")
	First(id string) GetItem
	// @PATH("id")
	Second(id string) GetItem
}
"#;
    let code = generate(source);
    assert!(!code.contains(") First("));
    assert!(code.contains("func (b *GetItemImpl) Second(id string) GetItem {"));
}

#[test]
fn unmatched_template_tokens_stay_verbatim() {
    let source = r#"package p

// @GET("/users/{user}/items/{id}")
type GetItem interface {
	// @PATH("id")
	ID(id string) GetItem
}
"#;
    let code = generate(source);
    assert!(code.contains("b.applyPathSubstitutions(\"/users/{user}/items/{id}\")"));
}

#[test]
fn every_path_token_gets_its_own_setter() {
    let source = r#"package p

// @GET("/users/{user}/photos/{id}")
type GetUserPhoto interface {
	// @PATH("id")
	PhotoID(id string) GetUserPhoto
	// @PATH("user")
	User(user string) GetUserPhoto
}
"#;
    let code = generate(source);

    let photo_id = function(&code, "func (b *GetUserPhotoImpl) PhotoID(id string) GetUserPhoto {");
    assert!(photo_id.contains("\tb.pathSubstitutions[\"id\"] = id\n"));
    let user = function(&code, "func (b *GetUserPhotoImpl) User(user string) GetUserPhoto {");
    assert!(user.contains("\tb.pathSubstitutions[\"user\"] = user\n"));
    assert!(code.find(") PhotoID(").unwrap() < code.find(") User(").unwrap());

    let apply = function(
        &code,
        "func (b *GetUserPhotoImpl) applyPathSubstitutions(api string) string {",
    );
    assert!(apply.contains("for key, value := range b.pathSubstitutions {"));
    assert!(code.contains(
        "endpoint := b.client.BaseURL() + b.applyPathSubstitutions(\"/users/{user}/photos/{id}\")"
    ));
}

#[test]
fn unit_without_annotations_yields_package_only() {
    let source = "package p\n\ntype Plain interface {\n\tDo()\n}\n";
    let code = generate_source(source, &GeneratorConfig::default().without_banner(), &Verbatim)
        .unwrap();
    assert_eq!(code, "package p\n");
}

#[test]
fn syntax_errors_produce_no_output() {
    let err = generate_source(
        "package p\n\ntype Broken interface {\n",
        &GeneratorConfig::default(),
        &Verbatim,
    )
    .unwrap_err();
    assert!(matches!(err, GeneratorError::Parse { .. }));
}

#[test]
fn async_without_sync_is_fatal() {
    let source = r#"package p

// @GET("/items")
type ListItems interface {
	// @ASYNC("ItemsCallback")
	RunAsync(callback ItemsCallback)
}
"#;
    let err = generate_source(source, &GeneratorConfig::default(), &Verbatim).unwrap_err();
    assert_eq!(
        err.to_string(),
        "'ListItems' declares an @ASYNC method but no @SYNC method to run it"
    );
}

#[test]
fn parameterless_setter_is_fatal() {
    let source = r#"package p

// @GET("/items")
type ListItems interface {
	// @QUERY("all")
	All() ListItems
}
"#;
    let err = generate_source(source, &GeneratorConfig::default(), &Verbatim).unwrap_err();
    assert!(matches!(
        err,
        GeneratorError::MissingArgument { ref request_type, ref method }
            if request_type == "ListItems" && method == "All"
    ));
}
