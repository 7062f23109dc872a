use minijinja::{Environment, context};
use std::fs;
use std::path::Path;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
struct TypeInfo {
    name: String,
    rust: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct TypeList {
    types: Vec<TypeInfo>,
}

fn main() {
    let yaml_str = fs::read_to_string("../supported_types.yaml")
        .expect("Unable to read supported_types.yaml");
    let type_list: TypeList = serde_yaml::from_str(&yaml_str)
        .expect("Failed to parse YAML");

    let template_source = fs::read_to_string("templates/tensor_any.jinja")
        .expect("Unable to read template file");

    let env = Environment::new();
    let tmpl = env.template_from_str(&template_source)
        .expect("Invalid tensor_any template");

    let rendered = tmpl.render(context! { types => type_list.types })
        .expect("Failed to render tensor_any template");

    let out_path = Path::new("src/generated_tensor_any.rs");
    if fs::read_to_string(out_path).ok().as_deref() != Some(rendered.as_str()) {
        fs::write(out_path, rendered)
            .expect("Unable to write generated file");
    }

    println!("cargo:rerun-if-changed=../supported_types.yaml");
    println!("cargo:rerun-if-changed=templates/tensor_any.jinja");
}
