use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::{Attribute, Item, Token};

#[derive(Clone, Copy)]
pub enum Kind {
    State,
    Request,
}

impl Kind {
    fn name(self) -> &'static str {
        match self {
            Kind::State => "state",
            Kind::Request => "request",
        }
    }

    fn required_derives(self) -> &'static [&'static str] {
        match self {
            Kind::State => &["Debug", "Clone", "PartialEq"],
            Kind::Request => &["Debug", "Clone"],
        }
    }
}

pub fn expand(kind: Kind, attr: TokenStream, mut item: Item) -> syn::Result<TokenStream> {
    let path = parse_path(kind, attr)?;

    let (ident, generics, attrs) = match &mut item {
        Item::Struct(s) => (s.ident.clone(), s.generics.clone(), &mut s.attrs),
        Item::Enum(e) if matches!(kind, Kind::State) => (e.ident.clone(), e.generics.clone(), &mut e.attrs),
        other => {
            return Err(syn::Error::new_spanned(
                other,
                format!("#[{}] only applies to structs{}", kind.name(), match kind {
                    Kind::State => " and enums",
                    Kind::Request => "",
                }),
            ));
        }
    };

    if !generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &generics,
            format!("#[{}] types cannot be generic", kind.name()),
        ));
    }

    let present = collect_derives(attrs);
    let missing: Vec<_> = kind
        .required_derives()
        .iter()
        .filter(|d| !present.iter().any(|p| p == *d))
        .map(|d| format_ident!("{}", d))
        .collect();
    if !missing.is_empty() {
        attrs.insert(0, syn::parse_quote!(#[derive(#(#missing),*)]));
    }

    let trait_path = match kind {
        Kind::State => quote!(::safespot_flux::State),
        Kind::Request => quote!(::safespot_flux::Request),
    };
    let doc = format!("The {} path for Flux routing.", kind.name());

    Ok(quote! {
        #item

        impl #ident {
            #[doc = #doc]
            pub const PATH: &'static str = #path;
        }

        impl #trait_path for #ident {
            const PATH: &'static str = #path;
        }
    })
}

fn parse_path(kind: Kind, attr: TokenStream) -> syn::Result<String> {
    let lit: syn::LitStr = syn::parse2(attr)?;
    let path = lit.value();
    if path.is_empty() {
        return Err(syn::Error::new(
            lit.span(),
            format!("{} path cannot be empty", kind.name()),
        ));
    }
    if path.contains(['+', '#']) {
        return Err(syn::Error::new(
            lit.span(),
            format!("{} path cannot contain wildcards", kind.name()),
        ));
    }
    Ok(path)
}

fn collect_derives(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|a| a.path().is_ident("derive"))
        .filter_map(|a| {
            a.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .filter_map(|p| p.segments.last().map(|s| s.ident.to_string()))
        .collect()
}
