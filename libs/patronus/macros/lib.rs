extern crate proc_macro;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Usage:
/// `
/// #[patronus(name = "TaskUpdate", derives = "Default, Serialize")]
/// struct Task { id: String }
#[proc_macro_attribute]
pub fn patronus(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let mut updated_struct_name = None;
    let mut derives: Vec<String> = Vec::new();

    let attr_parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("name") {
            let lit: LitStr = meta.value()?.parse()?;
            updated_struct_name = Some(format_ident!("{}", lit.value()));
            Ok(())
        } else if meta.path.is_ident("derives") {
            let lit: LitStr = meta.value()?.parse()?;
            derives = lit
                .value()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            Ok(())
        } else {
            Err(meta.error("unsupported patronus property, expected `name` or `derives`"))
        }
    });
    parse_macro_input!(attr with attr_parser);

    let Some(updated_struct_name) = updated_struct_name else {
        return syn::Error::new_spanned(&input.ident, "missing 'name' field")
            .to_compile_error()
            .into();
    };

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.clone(),
            _ => {
                return syn::Error::new_spanned(
                    &input.ident,
                    "the macro can only be applied on struct with named fields",
                )
                .to_compile_error()
                .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(
                &input.ident,
                "the macro can only be applied on struct with named fields",
            )
            .to_compile_error()
            .into()
        }
    };

    let is_serializable = derives.iter().any(|d| d == "Serialize");
    let derives_tokens = derives.iter().map(|d| format_ident!("{}", d));
    let vis = &input.vis;

    let field_definitions = fields.iter().map(|f| {
        let name = &f.ident;
        let ty = &f.ty;
        let skip = is_serializable.then(|| {
            quote! { #[serde(skip_serializing_if = "Option::is_none")] }
        });
        quote! {
            #skip
            pub #name: Option<#ty>,
        }
    });

    let setters = fields.iter().map(|f| {
        let name = &f.ident;
        let ty = &f.ty;
        let field = name.as_ref().map(|n| n.to_string()).unwrap_or_default();
        let set_opt_fn_name = format_ident!("set_opt_{}", field);
        let set_fn_name = format_ident!("set_{}", field);
        let unset_fn_name = format_ident!("unset_{}", field);
        quote! {
            #[allow(non_snake_case)]
            pub fn #set_opt_fn_name(mut self, value: impl Into<Option<#ty>>) -> Self {
                self.#name = value.into();
                self
            }

            #[allow(non_snake_case)]
            pub fn #set_fn_name(mut self, value: impl Into<#ty>) -> Self {
                self.#name = Some(value.into());
                self
            }

            #[allow(non_snake_case)]
            pub fn #unset_fn_name(mut self) -> Self {
                self.#name = None;
                self
            }
        }
    });

    let changed = fields.iter().map(|f| {
        let name = &f.ident;
        let field = name.as_ref().map(|n| n.to_string()).unwrap_or_default();
        quote! {
            if self.#name.is_some() {
                changed.push(#field);
            }
        }
    });

    let expanded = quote! {
        #input

        #[derive(#(#derives_tokens),*)]
        #vis struct #updated_struct_name {
            #(#field_definitions)*
        }

        impl #updated_struct_name {
            #(#setters)*

            /// Names of the fields carried by this update, in declaration order
            pub fn changed_fields(&self) -> Vec<&'static str> {
                let mut changed = Vec::new();
                #(#changed)*
                changed
            }

            pub fn is_empty(&self) -> bool {
                self.changed_fields().is_empty()
            }
        }
    };

    TokenStream::from(expanded)
}
