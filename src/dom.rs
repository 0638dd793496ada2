//! Árbol de elementos en memoria para construir la página de forma estructural.
//!
//! El texto y los atributos se guardan tal cual y sólo se escapan al
//! serializar, así que nada de lo que devuelve el servidor puede inyectar
//! marcado en la página.

/// Nodo del árbol: elemento o texto.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// Elemento HTML con atributos ordenados e hijos.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

// Elementos sin etiqueta de cierre.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Añade (o sustituye) un atributo.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.append_text(text);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Hijos que son elementos, en orden.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Equivalente a vaciar `innerHTML`.
    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Sustituye todo el contenido por un único hijo.
    pub fn replace_children(&mut self, child: Element) {
        self.children.clear();
        self.children.push(Node::Element(child));
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Concatenación de todo el texto descendiente.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Busca en profundidad el primer elemento con el `id` indicado.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|el| el.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(el) => el.find_by_id_mut(id),
            Node::Text(_) => None,
        })
    }

    /// Primer descendiente (incluido él mismo) con la etiqueta dada.
    pub fn find_by_tag_mut(&mut self, tag: &str) -> Option<&mut Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(el) => el.find_by_tag_mut(tag),
            Node::Text(_) => None,
        })
    }

    /// Todos los descendientes (incluido él mismo) con la etiqueta dada.
    pub fn find_all_by_tag<'a>(&'a self, tag: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_by_tag(self, tag, &mut found);
        found
    }

    /// Serializa el subárbol a HTML escapando texto y atributos.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(self, &mut out);
        out
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for node in &el.children {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(child) => collect_text(child, out),
        }
    }
}

fn collect_by_tag<'a>(el: &'a Element, tag: &str, found: &mut Vec<&'a Element>) {
    if el.tag == tag {
        found.push(el);
    }
    for child in el.child_elements() {
        collect_by_tag(child, tag, found);
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }
    out.push('>');

    if VOID_TAGS.contains(&el.tag.as_str()) {
        return;
    }

    for node in &el.children {
        match node {
            Node::Text(t) => out.push_str(&escape(t)),
            Node::Element(child) => write_element(child, out),
        }
    }

    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

/// Escapa los caracteres con significado en HTML (texto y atributos).
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
