//! Structured model of a generated constants file and its C# renderer.
//!
//! Emitters build a [`ClassFile`] (namespace, class name, ordered members)
//! and rendering happens in one place, so the traversal that collects
//! metadata never needs to know how the output text is formatted.

use crate::sanitize::{InvalidLabel, sanitize};

/// Header line marking every generated file.
pub const GENERATED_HEADER: &str = "// This class is auto-generated do not modify";

/// One member of a generated class, in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// `public const string NAME = "value";`
    StringConst { name: String, value: String },
    /// `public const int NAME = value;`
    IntConst { name: String, value: i32 },
    /// A literal text block emitted as-is (helper functions).
    Raw(&'static str),
    /// Blank separator line.
    Blank,
}

/// A complete constants file before serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFile {
    pub namespace: String,
    pub class_name: String,
    pub members: Vec<Member>,
}

impl ClassFile {
    pub fn new(namespace: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            class_name: class_name.into(),
            members: Vec::new(),
        }
    }

    pub fn push(&mut self, member: Member) {
        self.members.push(member);
    }

    /// Render to C# source text.
    ///
    /// Members are rendered in insertion order; running this twice over the
    /// same model yields byte-identical text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(GENERATED_HEADER);
        out.push('\n');
        out.push_str(&format!("namespace {}\n", self.namespace));
        out.push_str("{\n");
        out.push_str(&format!("\tpublic static class {}\n", self.class_name));
        out.push_str("\t{\n");

        for member in &self.members {
            match member {
                Member::StringConst { name, value } => {
                    out.push_str(&format!(
                        "\t\tpublic const string {} = \"{}\";\n",
                        name, value
                    ));
                }
                Member::IntConst { name, value } => {
                    out.push_str(&format!("\t\tpublic const int {} = {};\n", name, value));
                }
                Member::Raw(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                Member::Blank => out.push('\n'),
            }
        }

        out.push_str("\t}\n");
        out.push_str("}\n");
        out
    }
}

/// Build a class of string constants, one per label, in input order.
///
/// The constant value defaults to the raw label itself.
pub fn constant_class(
    namespace: &str,
    class_name: &str,
    labels: &[String],
) -> Result<ClassFile, InvalidLabel> {
    let mut class = ClassFile::new(namespace, class_name);
    for label in labels {
        class.push(Member::StringConst {
            name: sanitize(label)?,
            value: label.clone(),
        });
    }
    Ok(class)
}

/// Build a class of string constants with explicit, pre-sanitized names.
///
/// Used for resource paths, where the constant name comes from the file stem
/// but the value is the load path.
pub fn value_class(
    namespace: &str,
    class_name: &str,
    entries: impl IntoIterator<Item = (String, String)>,
) -> ClassFile {
    let mut class = ClassFile::new(namespace, class_name);
    for (name, value) in entries {
        class.push(Member::StringConst { name, value });
    }
    class
}

/// Helper emitted into the scenes class: advance to the next scene in build
/// order, wrapping back to the first.
const NEXT_SCENE_HELPER: &str = "\t\tpublic static int nextSceneIndex()
\t\t{
\t\t\tif( UnityEngine.Application.loadedLevel + 1 == TOTAL_SCENES )
\t\t\t\treturn 0;
\t\t\treturn UnityEngine.Application.loadedLevel + 1;
\t\t}";

/// Build the scenes class: one string constant per scene name plus the scene
/// count and the wraparound `nextSceneIndex()` helper.
pub fn scene_class(
    namespace: &str,
    class_name: &str,
    scene_names: &[String],
) -> Result<ClassFile, InvalidLabel> {
    let mut class = constant_class(namespace, class_name, scene_names)?;
    class.push(Member::Blank);
    class.push(Member::IntConst {
        name: "TOTAL_SCENES".to_string(),
        value: scene_names.len() as i32,
    });
    class.push(Member::Blank);
    class.push(Member::Raw(NEXT_SCENE_HELPER));
    Ok(class)
}

/// Bitmask helpers emitted into the layers class. Downstream code depends on
/// this exact masking contract: shift, OR-accumulate, full complement.
const MASK_HELPERS: &str = "\t\tpublic static int onlyIncluding( params int[] layers )
\t\t{
\t\t\tint mask = 0;
\t\t\tfor( var i = 0; i < layers.Length; i++ )
\t\t\t\tmask |= ( 1 << layers[i] );
\t\t\treturn mask;
\t\t}

\t\tpublic static int everythingBut( params int[] layers )
\t\t{
\t\t\treturn ~onlyIncluding( layers );
\t\t}";

/// Build the layers class: one int constant per layer slot, then the two
/// fixed bitmask helpers.
pub fn layer_class(
    namespace: &str,
    class_name: &str,
    layers: &[(String, i32)],
) -> Result<ClassFile, InvalidLabel> {
    let mut class = ClassFile::new(namespace, class_name);
    for (label, index) in layers {
        class.push(Member::IntConst {
            name: sanitize(label)?,
            value: *index,
        });
    }
    class.push(Member::Blank);
    class.push(Member::Raw(MASK_HELPERS));
    Ok(class)
}

/// Build the sorting-layers class: int constants keyed by the host-assigned
/// numeric IDs, no helper block.
pub fn sorting_layer_class(
    namespace: &str,
    class_name: &str,
    layers: &[(String, i32)],
) -> Result<ClassFile, InvalidLabel> {
    let mut class = ClassFile::new(namespace, class_name);
    for (label, id) in layers {
        class.push(Member::IntConst {
            name: sanitize(label)?,
            value: *id,
        });
    }
    Ok(class)
}
