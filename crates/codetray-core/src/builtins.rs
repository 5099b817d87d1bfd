use crate::models::{Category, Snippet};

const HTML: &[(&str, &str)] = &[
    (
        "Boilerplate",
        "<!DOCTYPE html>\n<html>\n<head>\n<title></title>\n</head>\n<body>\n\n</body>\n</html>",
    ),
    ("Div Container", "<div class=\"container\">\n\n</div>"),
    (
        "Flex Row",
        "<div style=\"display: flex; flex-direction: row;\">\n\n</div>",
    ),
    ("Input Field", "<input type=\"text\" placeholder=\"\">"),
    ("Submit Button", "<button type=\"submit\">Submit</button>"),
    ("Image Link", "<img src=\"\" alt=\"\">"),
    ("List (UL)", "<ul>\n  <li></li>\n</ul>"),
    ("Table", "<table>\n  <tr><td></td></tr>\n</table>"),
    (
        "Form",
        "<form>\n  <input type=\"text\">\n  <button>Go</button>\n</form>",
    ),
    ("Style Tag", "<style>\n\n</style>"),
    ("Script Tag", "<script>\n\n</script>"),
];

const JS: &[(&str, &str)] = &[
    ("Console Log", "console.log();"),
    (
        "Async Func",
        "async function name() {\n  try {\n    \n  } catch (err) {}\n}",
    ),
    ("Arrow Func", "const name = () => {\n  \n};"),
    ("Event Listener", "addEventListener(\"click\", (e) => {});"),
    ("Map Array", "const newArr = arr.map(item => item);"),
    (
        "Fetch API",
        "const res = await fetch(url);\nconst data = await res.json();",
    ),
    (
        "Local Storage Set",
        "localStorage.setItem('key', JSON.stringify(data));",
    ),
    ("JSON Parse", "JSON.parse(data);"),
    ("Query Selector", "document.querySelector('');"),
    ("Set Timeout", "setTimeout(() => {}, 1000);"),
    (
        "React Component",
        "const App = () => {\n  return <div></div>;\n};",
    ),
];

const CSS: &[(&str, &str)] = &[
    (
        "Flex Center",
        "display: flex;\njustify-content: center;\nalign-items: center;",
    ),
    (
        "Grid Layout",
        "display: grid;\ngrid-template-columns: repeat(3, 1fr);",
    ),
    ("Box Shadow", "box-shadow: 0 4px 6px rgba(0,0,0,0.1);"),
    (
        "Reset CSS",
        "* {\n  margin: 0;\n  padding: 0;\n  box-sizing: border-box;\n}",
    ),
    ("Responsive Query", "@media (max-width: 768px) {\n\n}"),
    ("Transition", "transition: all 0.3s ease;"),
    ("Border Radius", "border-radius: 8px;"),
    ("Hover State", "&:hover {\n  opacity: 0.8;\n}"),
];

/// Compiled-in snippets for a category. Custom has none.
pub fn builtin_snippets(category: Category) -> Vec<Snippet> {
    let table = match category {
        Category::Html => HTML,
        Category::Js => JS,
        Category::Css => CSS,
        Category::Custom => &[],
    };
    table
        .iter()
        .map(|(label, body)| Snippet::new(*label, *body))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sets_have_expected_sizes() {
        assert_eq!(builtin_snippets(Category::Html).len(), 11);
        assert_eq!(builtin_snippets(Category::Js).len(), 11);
        assert_eq!(builtin_snippets(Category::Css).len(), 8);
        assert!(builtin_snippets(Category::Custom).is_empty());
    }

    #[test]
    fn builtins_are_never_blank() {
        for category in Category::ALL {
            for snippet in builtin_snippets(category) {
                assert!(!snippet.label.trim().is_empty());
                assert!(!snippet.body.trim().is_empty());
            }
        }
    }

    #[test]
    fn html_starts_with_boilerplate() {
        let html = builtin_snippets(Category::Html);
        assert_eq!(html[0].label, "Boilerplate");
        assert!(html[0].body.starts_with("<!DOCTYPE html>"));
    }
}
